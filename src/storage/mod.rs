//! Row-store contract and the bundled backends.

pub mod memory;
pub mod workbook;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Column order persisted per record.
pub mod columns {
    pub const IDENTIFIER: usize = 0;
    pub const DATE: usize = 1;
    pub const PATIENT_NAME: usize = 2;
    pub const MEDICAL_RECORD_NUMBER: usize = 3;
    pub const SEP_NUMBER: usize = 4;
    pub const PRESCRIPTION_NUMBER: usize = 5;
    pub const ITERATION: usize = 6;
    pub const DISPENSING: usize = 7;
    pub const COUNT: usize = 8;
}

/// Abstraction over the shared row store the entry form appends to.
///
/// Implementations hold no lock across calls; the duplicate-check read, the
/// identifier read, and the append are independent operations against state
/// other sessions may be mutating.
pub trait RowStore: Send + Sync + std::fmt::Debug {
    /// Ordered values of one column, one entry per stored record.
    fn read_column(&self, column: usize) -> Result<Vec<String>>;

    /// Appends one record in the `columns` order.
    fn append_row(&self, row: &[String]) -> Result<()>;
}

impl<S: RowStore + ?Sized> RowStore for Arc<S> {
    fn read_column(&self, column: usize) -> Result<Vec<String>> {
        (**self).read_column(column)
    }

    fn append_row(&self, row: &[String]) -> Result<()> {
        (**self).append_row(row)
    }
}

/// Acquires a store handle at submission time.
pub trait StoreConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn RowStore>>;
}

/// How store-read failures during the duplicate check and identifier
/// computation are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadErrorPolicy {
    /// Assume no duplicate and identifier 1, logging a warning. This is the
    /// historical behavior of the entry form and masks store outages.
    #[default]
    FailOpen,
    /// Surface the read failure to the operator.
    Propagate,
}

pub use memory::{MemoryConnector, MemoryStore};
pub use workbook::{WorkbookConnector, WorkbookStore};
