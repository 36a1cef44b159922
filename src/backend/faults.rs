//! Fault-injecting backend wrappers
//!
//! These wrap a real backend and misbehave in one specific, repeatable way.
//! They exist to check that the verifier reports each class of backend
//! defect instead of hiding it:
//!
//! - [`TruncatingBackend`]: binary column is cut to a fixed length on write
//! - [`ForgetfulBackend`]: writes are acknowledged but never stored
//! - [`UnavailableBackend`]: every call fails as if the backend were unreachable

use super::errors::{BackendError, BackendResult};
use super::record::Record;
use super::StorageBackend;

/// Stores at most `max_blob_bytes` of every binary value.
#[derive(Debug)]
pub struct TruncatingBackend<B> {
    inner: B,
    max_blob_bytes: usize,
}

impl<B: StorageBackend> TruncatingBackend<B> {
    pub fn new(inner: B, max_blob_bytes: usize) -> Self {
        Self {
            inner,
            max_blob_bytes,
        }
    }

    pub fn max_blob_bytes(&self) -> usize {
        self.max_blob_bytes
    }
}

impl<B: StorageBackend> StorageBackend for TruncatingBackend<B> {
    fn name(&self) -> &'static str {
        "truncating"
    }

    fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()> {
        let end = binary_value.len().min(self.max_blob_bytes);
        self.inner.put(key, text_value, &binary_value[..end])
    }

    fn get(&self, key: &str) -> BackendResult<Record> {
        self.inner.get(key)
    }
}

/// Acknowledges every write without storing it.
#[derive(Debug)]
pub struct ForgetfulBackend<B> {
    inner: B,
}

impl<B: StorageBackend> ForgetfulBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: StorageBackend> StorageBackend for ForgetfulBackend<B> {
    fn name(&self) -> &'static str {
        "forgetful"
    }

    fn put(&self, _key: &str, _text_value: &str, _binary_value: &[u8]) -> BackendResult<()> {
        Ok(())
    }

    fn get(&self, key: &str) -> BackendResult<Record> {
        self.inner.get(key)
    }
}

/// Fails every call with [`BackendError::Unavailable`].
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl StorageBackend for UnavailableBackend {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn put(&self, _key: &str, _text_value: &str, _binary_value: &[u8]) -> BackendResult<()> {
        Err(BackendError::Unavailable(self.reason.clone()))
    }

    fn get(&self, _key: &str) -> BackendResult<Record> {
        Err(BackendError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_truncating_caps_blob_only() {
        let backend = TruncatingBackend::new(MemoryBackend::new(), 4);
        backend.put("k", "abcdefgh", b"abcdefgh").unwrap();

        let record = backend.get("k").unwrap();
        assert_eq!(record.text_value, "abcdefgh");
        assert_eq!(record.binary_value, b"abcd");
    }

    #[test]
    fn test_truncating_short_values_untouched() {
        let backend = TruncatingBackend::new(MemoryBackend::new(), 10);
        backend.put("k", "ab", b"ab").unwrap();
        assert_eq!(backend.get("k").unwrap().binary_value, b"ab");
        assert_eq!(backend.max_blob_bytes(), 10);
    }

    #[test]
    fn test_forgetful_loses_writes() {
        let backend = ForgetfulBackend::new(MemoryBackend::new());
        backend.put("k", "v", b"v").unwrap();
        assert!(backend.get("k").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unavailable() {
        let backend = UnavailableBackend::new("connection refused");
        let err = backend.put("k", "v", b"v").unwrap_err();
        assert_eq!(err, BackendError::Unavailable("connection refused".into()));
        assert!(backend.get("k").is_err());
    }
}
