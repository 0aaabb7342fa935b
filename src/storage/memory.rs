//! In-memory backend for tests and embedding.

use std::sync::{Arc, Mutex};

use super::{Result, RowStore, StoreConnector};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given rows.
    pub fn seeded(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().expect("row store lock poisoned").clone()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().expect("row store lock poisoned").len()
    }
}

impl RowStore for MemoryStore {
    fn read_column(&self, column: usize) -> Result<Vec<String>> {
        let rows = self.rows.lock().expect("row store lock poisoned");
        Ok(rows
            .iter()
            .filter_map(|row| row.get(column).cloned())
            .collect())
    }

    fn append_row(&self, row: &[String]) -> Result<()> {
        let mut rows = self.rows.lock().expect("row store lock poisoned");
        rows.push(row.to_vec());
        Ok(())
    }
}

/// Connector handing out handles to one shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    store: Arc<MemoryStore>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(rows: Vec<Vec<String>>) -> Self {
        Self {
            store: Arc::new(MemoryStore::seeded(rows)),
        }
    }

    /// The shared store behind every handle this connector hands out.
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self) -> Result<Box<dyn RowStore>> {
        Ok(Box::new(Arc::clone(&self.store)))
    }
}
