//! # Storage Backend Errors

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Storage backend errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupted record for key {key}: {reason}")]
    Corruption { key: String, reason: String },

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            BackendError::NotFound(_) => "BLOBCHECK_NOT_FOUND",
            BackendError::Io(_) => "BLOBCHECK_BACKEND_IO",
            BackendError::Corruption { .. } => "BLOBCHECK_BACKEND_CORRUPTION",
            BackendError::Unavailable(_) => "BLOBCHECK_BACKEND_UNAVAILABLE",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }

    pub(crate) fn corruption(key: &str, reason: impl Into<String>) -> Self {
        BackendError::Corruption {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(e: std::io::Error) -> Self {
        BackendError::Io(e.to_string())
    }
}
