//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use super::errors::{BackendError, BackendResult};
use super::record::Record;
use super::StorageBackend;

/// In-memory storage backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: RwLock<BTreeMap<String, (String, Vec<u8>)>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Counts through a poisoned lock.
    pub fn len(&self) -> usize {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> BackendError {
    BackendError::Unavailable("memory backend lock poisoned".to_string())
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(
            key.to_string(),
            (text_value.to_string(), binary_value.to_vec()),
        );
        Ok(())
    }

    fn get(&self, key: &str) -> BackendResult<Record> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        rows.get(key)
            .map(|(text, bytes)| Record::new(key, text.clone(), bytes.clone()))
            .ok_or_else(|| BackendError::NotFound(key.to_string()))
    }
}
