//! Verification error types
//!
//! A mismatch is not an error: it is reported through
//! [`VerificationResult`](super::VerificationResult). These errors mean the
//! verification itself could not complete.

use thiserror::Error;

use crate::backend::BackendError;
use crate::codec::DecodeError;

/// Result type for verification runs
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that abort a verification run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Codec could not decode bytes it produced or the backend returned
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Record absent right after a successful write
    #[error("Record not found after write: {0}")]
    NotFound(String),

    /// Transport or storage failure, passed through unchanged
    #[error(transparent)]
    Backend(BackendError),
}

impl VerifyError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            VerifyError::Decode(e) => e.code(),
            VerifyError::NotFound(_) => "BLOBCHECK_NOT_FOUND",
            VerifyError::Backend(e) => e.code(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, VerifyError::NotFound(_))
    }
}

impl From<BackendError> for VerifyError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound(key) => VerifyError::NotFound(key),
            other => VerifyError::Backend(other),
        }
    }
}
