//! # Storage Backends
//!
//! The verifier exercises a key/value table through the [`StorageBackend`]
//! capability. Each record has a text column and an opaque binary column.
//!
//! Concrete backends:
//! - [`MemoryBackend`]: in-process map, last write wins
//! - [`FileBackend`]: one checksummed file per key under `<data_dir>/<table>/`
//!
//! Fault-injecting wrappers for diagnosing the verifier itself live in
//! [`faults`].

mod checksum;
mod errors;
mod file;
mod memory;
mod record;
pub mod faults;

use serde::{Deserialize, Serialize};

pub use errors::{BackendError, BackendResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use record::Record;

/// Key/value persistence capability exercised by the verifier
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Short backend name for logs and reports
    fn name(&self) -> &'static str;

    /// Write one record, overwriting any record with the same key
    fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()>;

    /// Read the record stored under `key`
    ///
    /// Fails with [`BackendError::NotFound`] when no record exists.
    fn get(&self, key: &str) -> BackendResult<Record>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()> {
        (**self).put(key, text_value, binary_value)
    }

    fn get(&self, key: &str) -> BackendResult<Record> {
        (**self).get(key)
    }
}

/// Concrete backend selector used by configuration and the CLI
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process map; contents vanish with the process
    Memory,
    /// Checksummed files under the data directory
    #[default]
    File,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_backend_delegates() {
        let backend: Box<dyn StorageBackend> = Box::new(MemoryBackend::new());
        backend.put("k", "v", b"v").unwrap();
        assert_eq!(backend.name(), "memory");
        assert_eq!(backend.get("k").unwrap().text_value, "v");
    }

    #[test]
    fn test_backend_kind_serde() {
        let kind: BackendKind = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(kind, BackendKind::Memory);
        assert_eq!(serde_json::to_string(&BackendKind::File).unwrap(), "\"file\"");
        assert_eq!(BackendKind::default(), BackendKind::File);
    }
}
