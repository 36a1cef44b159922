//! Round-trip verifier
//!
//! One run is a single linear sequence:
//!
//! 1. Encode the text value
//! 2. Check the codec reproduces the text from those bytes
//! 3. `put` the record
//! 4. `get` it back
//! 5. Compare both columns
//!
//! There are no retries. A missing record after a successful `put` is a
//! consistency violation and is returned as [`VerifyError::NotFound`]; every
//! other backend error is returned unchanged.
//!
//! The verifier holds no mutable state. Runs with distinct keys may execute
//! concurrently if the backend allows it. Runs sharing a key race under
//! last-write-wins and each result reflects whichever write its read saw.

use crate::backend::{Record, StorageBackend};
use crate::codec::{to_hex, Codec, DecodeError, Utf8Codec};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::errors::{VerifyError, VerifyResult};
use super::result::VerificationResult;

/// Runs write-then-read verifications through a codec.
#[derive(Debug, Clone, Default)]
pub struct RoundTripVerifier<C = Utf8Codec> {
    codec: C,
}

impl<C: Codec> RoundTripVerifier<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Write `text_value` under `key` as both columns, read it back, compare.
    pub fn verify<B>(
        &self,
        key: &str,
        text_value: &str,
        backend: &B,
    ) -> VerifyResult<VerificationResult>
    where
        B: StorageBackend + ?Sized,
    {
        log_event_with_fields(
            Event::VerifyBegin,
            &[
                ("backend", backend.name()),
                ("codec", self.codec.name()),
                ("key", key),
            ],
        );

        let outcome = self.run(key, text_value, backend);

        match &outcome {
            Ok(result) if result.is_match() => {
                log_event_with_fields(Event::VerifyComplete, &[("key", key)]);
            }
            Ok(result) => {
                let expected = result.expected_hex();
                let actual = result.actual_hex();
                log_event_with_fields(
                    Event::VerifyMismatch,
                    &[
                        ("actual_hex", actual.as_str()),
                        ("binary_match", bool_str(result.binary_match())),
                        ("expected_hex", expected.as_str()),
                        ("key", key),
                        ("text_match", bool_str(result.text_match())),
                    ],
                );
            }
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(
                    Event::VerifyFailed,
                    &[("code", e.code()), ("error", message.as_str()), ("key", key)],
                );
            }
        }

        outcome
    }

    fn run<B>(&self, key: &str, text_value: &str, backend: &B) -> VerifyResult<VerificationResult>
    where
        B: StorageBackend + ?Sized,
    {
        let written = Record::encoded(key, text_value, &self.codec);

        // A codec that cannot reproduce its own input would blame the backend.
        let decoded = self.codec.decode(&written.binary_value)?;
        if decoded != written.text_value {
            return Err(VerifyError::Decode(DecodeError::new(
                self.codec.name(),
                0,
                "codec did not reproduce the original text",
            )));
        }

        backend.put(&written.key, &written.text_value, &written.binary_value)?;
        let count = written.binary_value.len().to_string();
        log_event_with_fields(Event::RecordPut, &[("bytes", count.as_str()), ("key", key)]);

        let record = backend.get(key)?;
        let read = record.binary_value.len().to_string();
        log_event_with_fields(Event::RecordGet, &[("bytes", read.as_str()), ("key", key)]);

        if Logger::enabled(Severity::Trace) {
            let hex = to_hex(&record.binary_value);
            Logger::trace(
                Event::RecordGet.as_str(),
                &[
                    ("hex", hex.as_str()),
                    ("key", key),
                    ("text", record.text_value.as_str()),
                ],
            );
        }

        Ok(VerificationResult::compare(
            &written.text_value,
            written.binary_value,
            &record.text_value,
            record.binary_value,
        ))
    }
}

/// Verify with the UTF-8 codec.
pub fn verify<B>(key: &str, text_value: &str, backend: &B) -> VerifyResult<VerificationResult>
where
    B: StorageBackend + ?Sized,
{
    RoundTripVerifier::new(Utf8Codec).verify(key, text_value, backend)
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::faults::{ForgetfulBackend, TruncatingBackend, UnavailableBackend};
    use crate::backend::{BackendError, BackendResult, MemoryBackend};
    use crate::codec::DecodeResult;
    use std::sync::Mutex;

    /// Records the sequence of calls made against it
    #[derive(Debug, Default)]
    struct RecordingBackend {
        inner: MemoryBackend,
        calls: Mutex<Vec<String>>,
    }

    impl StorageBackend for RecordingBackend {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()> {
            self.calls.lock().unwrap().push(format!("put:{}", key));
            self.inner.put(key, text_value, binary_value)
        }

        fn get(&self, key: &str) -> BackendResult<Record> {
            self.calls.lock().unwrap().push(format!("get:{}", key));
            self.inner.get(key)
        }
    }

    /// Stores the text column upper-cased
    #[derive(Debug, Default)]
    struct ShoutingBackend {
        inner: MemoryBackend,
    }

    impl StorageBackend for ShoutingBackend {
        fn name(&self) -> &'static str {
            "shouting"
        }

        fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()> {
            self.inner.put(key, &text_value.to_uppercase(), binary_value)
        }

        fn get(&self, key: &str) -> BackendResult<Record> {
            self.inner.get(key)
        }
    }

    /// Codec whose decode does not invert encode
    #[derive(Debug)]
    struct LossyCodec;

    impl Codec for LossyCodec {
        fn name(&self) -> &'static str {
            "lossy"
        }

        fn encode(&self, text: &str) -> Vec<u8> {
            text.bytes().filter(u8::is_ascii).collect()
        }

        fn decode(&self, bytes: &[u8]) -> DecodeResult<String> {
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    #[test]
    fn test_single_put_then_single_get() {
        let backend = RecordingBackend::default();
        verify("u1", "Ms. Foo Bar", &backend).unwrap();

        let calls = backend.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["put:u1".to_string(), "get:u1".to_string()]);
    }

    #[test]
    fn test_faithful_backend_matches() {
        let result = verify("u1", "Ms. Foo Bar", &MemoryBackend::new()).unwrap();
        assert!(result.is_match());
        assert_eq!(result.expected_bytes(), result.actual_bytes());
    }

    #[test]
    fn test_text_mismatch_is_data() {
        let result = verify("u1", "Ms. Foo Bar", &ShoutingBackend::default()).unwrap();
        assert!(!result.text_match());
        assert!(result.binary_match());
    }

    #[test]
    fn test_truncation_reported_as_mismatch() {
        let backend = TruncatingBackend::new(MemoryBackend::new(), 3);
        let result = verify("u1", "abcdef", &backend).unwrap();
        assert!(result.text_match());
        assert!(!result.binary_match());
        assert_eq!(result.actual_bytes(), b"abc");
    }

    #[test]
    fn test_lost_write_is_not_found() {
        let backend = ForgetfulBackend::new(MemoryBackend::new());
        let err = verify("u1", "Ms. Foo Bar", &backend).unwrap_err();
        assert_eq!(err, VerifyError::NotFound("u1".into()));
    }

    #[test]
    fn test_unreachable_backend_propagates() {
        let backend = UnavailableBackend::new("connection refused");
        let err = verify("u1", "Ms. Foo Bar", &backend).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Backend(BackendError::Unavailable("connection refused".into()))
        );
    }

    #[test]
    fn test_codec_self_check_blocks_write() {
        let backend = RecordingBackend::default();
        let verifier = RoundTripVerifier::new(LossyCodec);

        let err = verifier.verify("u1", "naïve", &backend).unwrap_err();
        assert!(matches!(err, VerifyError::Decode(_)));
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dyn_backend() {
        let backend: Box<dyn StorageBackend> = Box::new(MemoryBackend::new());
        let result = RoundTripVerifier::<Utf8Codec>::default()
            .verify("u1", "x", backend.as_ref())
            .unwrap();
        assert!(result.is_match());
    }
}
