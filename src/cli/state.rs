use std::path::{Path, PathBuf};

use crate::core::FormController;
use crate::storage::StoreConnector;

/// Shared CLI runtime state.
///
/// Holds the session's form controller along with the configured store
/// connection.
pub struct CliState {
    pub controller: FormController,
    pub connector: Box<dyn StoreConnector>,
    workbook_path: PathBuf,
}

impl CliState {
    pub fn new(
        controller: FormController,
        connector: Box<dyn StoreConnector>,
        workbook_path: PathBuf,
    ) -> Self {
        Self {
            controller,
            connector,
            workbook_path,
        }
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }
}
