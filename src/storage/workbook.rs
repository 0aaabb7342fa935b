//! JSON workbook backend: a local spreadsheet-like file of ordered string
//! rows.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::utils::ensure_dir;

use super::{Result, RowStore, StoreConnector};

const TMP_SUFFIX: &str = "tmp";
const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Workbook {
    #[serde(default = "schema_version_default")]
    schema_version: u8,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl Default for Workbook {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            rows: Vec::new(),
        }
    }
}

fn schema_version_default() -> u8 {
    CURRENT_SCHEMA_VERSION
}

/// File-backed store. Reads load the file on demand; appends rewrite it
/// atomically (tmp file + rename). A missing file reads as an empty workbook.
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    path: PathBuf,
}

impl WorkbookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Workbook> {
        if !self.path.exists() {
            return Ok(Workbook::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let workbook: Workbook = serde_json::from_str(&data)?;
        if workbook.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StoreError::Storage(format!(
                "workbook schema v{} is newer than supported v{}",
                workbook.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook) -> Result<()> {
        let json = serde_json::to_string_pretty(workbook)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RowStore for WorkbookStore {
    fn read_column(&self, column: usize) -> Result<Vec<String>> {
        let workbook = self.load()?;
        Ok(workbook
            .rows
            .iter()
            .filter_map(|row| row.get(column).cloned())
            .collect())
    }

    fn append_row(&self, row: &[String]) -> Result<()> {
        let mut workbook = self.load()?;
        workbook.rows.push(row.to_vec());
        self.save(&workbook)
    }
}

/// Opens the workbook file at submission time, creating its directory on
/// first use and validating any existing contents up front.
#[derive(Debug, Clone)]
pub struct WorkbookConnector {
    path: PathBuf,
}

impl WorkbookConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreConnector for WorkbookConnector {
    fn connect(&self) -> Result<Box<dyn RowStore>> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let store = WorkbookStore::new(self.path.clone());
        store.load()?;
        Ok(Box::new(store))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::columns;
    use tempfile::TempDir;

    fn sample_row(id: u64) -> Vec<String> {
        vec![
            id.to_string(),
            "2026-08-07".to_string(),
            "PANCA WISANTA".to_string(),
            "123456".to_string(),
            "1234567890123456789".to_string(),
            format!("{:014}", id),
            "Tanpa Iterasi".to_string(),
            "Ne Detur".to_string(),
        ]
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempDir::new().expect("temp dir");
        let store = WorkbookStore::new(temp.path().join("resep.json"));
        assert!(store.read_column(columns::IDENTIFIER).unwrap().is_empty());
    }

    #[test]
    fn append_then_read_round_trips() {
        let temp = TempDir::new().expect("temp dir");
        let store = WorkbookStore::new(temp.path().join("resep.json"));
        store.append_row(&sample_row(1)).expect("append");
        store.append_row(&sample_row(2)).expect("append");

        let numbers = store.read_column(columns::PRESCRIPTION_NUMBER).unwrap();
        assert_eq!(numbers, vec!["00000000000001", "00000000000002"]);
        assert_eq!(store.read_column(columns::IDENTIFIER).unwrap().len(), 2);
    }

    #[test]
    fn connector_creates_the_parent_directory() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("resep.json");
        let connector = WorkbookConnector::new(path.clone());
        let store = connector.connect().expect("connect");
        store.append_row(&sample_row(1)).expect("append");
        assert!(path.exists());
    }

    #[test]
    fn newer_schema_versions_are_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("resep.json");
        std::fs::write(&path, r#"{"schema_version": 9, "rows": []}"#).unwrap();

        let connector = WorkbookConnector::new(path);
        let err = connector.connect().expect_err("connect should fail");
        match err {
            StoreError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
