//! Observable events
//!
//! Events are explicit and typed. Their string names are stable and used as
//! the `event` field of every log line.

use std::fmt;

use super::logger::Severity;

/// Observable events in blobcheck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Backend lifecycle
    /// Concrete backend opened and ready
    BackendOpened,

    // Verification
    /// Verification started for a key
    VerifyBegin,
    /// Record written to the backend
    RecordPut,
    /// Record read back from the backend
    RecordGet,
    /// Text and binary columns came back unchanged
    VerifyComplete,
    /// Backend returned a different text or binary value
    VerifyMismatch,
    /// Verification aborted by an error
    VerifyFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::BackendOpened => "BACKEND_OPENED",
            Event::VerifyBegin => "VERIFY_BEGIN",
            Event::RecordPut => "RECORD_PUT",
            Event::RecordGet => "RECORD_GET",
            Event::VerifyComplete => "VERIFY_COMPLETE",
            Event::VerifyMismatch => "VERIFY_MISMATCH",
            Event::VerifyFailed => "VERIFY_FAILED",
        }
    }

    /// Returns true if this event reports a defect or failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::VerifyMismatch | Event::VerifyFailed)
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::VerifyMismatch => Severity::Warn,
            Event::VerifyFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::VerifyBegin.as_str(), "VERIFY_BEGIN");
        assert_eq!(Event::VerifyMismatch.to_string(), "VERIFY_MISMATCH");
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::VerifyMismatch.is_failure());
        assert!(Event::VerifyFailed.is_failure());
        assert!(!Event::VerifyComplete.is_failure());
        assert!(!Event::RecordPut.is_failure());
    }

    #[test]
    fn test_severity() {
        assert_eq!(Event::VerifyBegin.severity(), Severity::Info);
        assert_eq!(Event::VerifyMismatch.severity(), Severity::Warn);
        assert_eq!(Event::VerifyFailed.severity(), Severity::Error);
    }
}
