//! Codec error types

use thiserror::Error;

/// Result type for codec operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Bytes could not be decoded under the codec's encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot decode {codec} bytes at offset {offset}: {reason}")]
pub struct DecodeError {
    /// Codec that rejected the bytes
    pub codec: &'static str,
    /// Byte offset of the first invalid sequence
    pub offset: usize,
    /// Human-readable reason
    pub reason: String,
}

impl DecodeError {
    /// Create a new decode error
    pub fn new(codec: &'static str, offset: usize, reason: impl Into<String>) -> Self {
        Self {
            codec,
            offset,
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        "BLOBCHECK_DECODE_ERROR"
    }
}
