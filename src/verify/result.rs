//! Outcome of one round-trip verification

use serde::Serialize;

use crate::codec::{to_hex, Codec, DecodeResult};

/// What the backend returned compared with what was written.
///
/// Built once per run and never mutated; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    text_match: bool,
    binary_match: bool,
    expected_bytes: Vec<u8>,
    actual_bytes: Vec<u8>,
}

impl VerificationResult {
    /// Compare what was written with what was read back
    pub fn compare(
        expected_text: &str,
        expected_bytes: Vec<u8>,
        actual_text: &str,
        actual_bytes: Vec<u8>,
    ) -> Self {
        Self {
            text_match: expected_text == actual_text,
            binary_match: expected_bytes == actual_bytes,
            expected_bytes,
            actual_bytes,
        }
    }

    pub fn text_match(&self) -> bool {
        self.text_match
    }

    pub fn binary_match(&self) -> bool {
        self.binary_match
    }

    /// True when both columns came back unchanged
    pub fn is_match(&self) -> bool {
        self.text_match && self.binary_match
    }

    /// Encoding of the written text value
    pub fn expected_bytes(&self) -> &[u8] {
        &self.expected_bytes
    }

    /// Binary column as returned by the backend
    pub fn actual_bytes(&self) -> &[u8] {
        &self.actual_bytes
    }

    pub fn expected_hex(&self) -> String {
        to_hex(&self.expected_bytes)
    }

    pub fn actual_hex(&self) -> String {
        to_hex(&self.actual_bytes)
    }

    /// Decode the returned binary column back to text
    pub fn decode_actual(&self, codec: &dyn Codec) -> DecodeResult<String> {
        codec.decode(&self.actual_bytes)
    }
}
