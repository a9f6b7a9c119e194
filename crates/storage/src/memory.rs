//! In-memory store for tests and local runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::{RecordKey, TableRecord};
use crate::traits::RecordStore;

/// Upsert-by-key store over a `BTreeMap`, so iteration order matches the
/// store's range-query order (partition, then sort key).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: Mutex<BTreeMap<(String, String), TableRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys currently held.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all records in key order.
    pub fn records(&self) -> Vec<TableRecord> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, key: &RecordKey) -> Option<TableRecord> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(key.partition_key.clone(), key.sort_key.clone()))
            .cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn put_records(&self, records: &[TableRecord]) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        for record in records {
            let key = record.key();
            items.insert((key.partition_key, key.sort_key), record.clone());
        }
        Ok(())
    }
}
