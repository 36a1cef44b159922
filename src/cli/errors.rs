//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::backend::BackendError;
use crate::verify::VerifyError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Backend could not be opened
    BackendError,
    /// Verification could not complete
    VerifyFailed,
    /// Verification completed and found a mismatch
    Mismatch,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BLOBCHECK_CLI_CONFIG_ERROR",
            Self::IoError => "BLOBCHECK_CLI_IO_ERROR",
            Self::BackendError => "BLOBCHECK_CLI_BACKEND_ERROR",
            Self::VerifyFailed => "BLOBCHECK_CLI_VERIFY_FAILED",
            Self::Mismatch => "BLOBCHECK_CLI_MISMATCH",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Verification found a difference and the caller asked to fail on it
    pub fn mismatch(key: &str) -> Self {
        Self::new(
            CliErrorCode::Mismatch,
            format!("Round-trip mismatch for key '{}'", key),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<BackendError> for CliError {
    fn from(e: BackendError) -> Self {
        Self::new(CliErrorCode::BackendError, format!("{} ({})", e, e.code()))
    }
}

impl From<VerifyError> for CliError {
    fn from(e: VerifyError) -> Self {
        Self::new(CliErrorCode::VerifyFailed, format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_code_and_message() {
        let err = CliError::mismatch("u1");
        assert_eq!(err.code(), &CliErrorCode::Mismatch);
        assert_eq!(
            err.to_string(),
            "BLOBCHECK_CLI_MISMATCH: Round-trip mismatch for key 'u1'"
        );
    }

    #[test]
    fn test_verify_error_keeps_inner_code() {
        let err: CliError = VerifyError::NotFound("u1".into()).into();
        assert_eq!(err.code_str(), "BLOBCHECK_CLI_VERIFY_FAILED");
        assert!(err.message().contains("BLOBCHECK_NOT_FOUND"));
    }
}
