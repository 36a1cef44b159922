//! UTF-8 codec
//!
//! The canonical representation of a text value is its UTF-8 byte sequence,
//! which is what the byte helpers of most storage clients produce for strings.

use super::errors::{DecodeError, DecodeResult};
use super::Codec;

/// UTF-8 text codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Codec;

impl Utf8Codec {
    /// Codec name
    pub const NAME: &'static str = "utf-8";
}

impl Codec for Utf8Codec {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> DecodeResult<String> {
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(e) => {
                let reason = match e.error_len() {
                    Some(len) => format!("invalid sequence of {} byte(s)", len),
                    None => "incomplete sequence at end of input".to_string(),
                };
                Err(DecodeError::new(Self::NAME, e.valid_up_to(), reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii() {
        assert_eq!(Utf8Codec.encode("Ms. Foo Bar"), b"Ms. Foo Bar".to_vec());
    }

    #[test]
    fn test_empty() {
        assert!(Utf8Codec.encode("").is_empty());
        assert_eq!(Utf8Codec.decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_multibyte_longer_than_char_count() {
        let text = "naïve 日本";
        let bytes = Utf8Codec.encode(text);
        assert!(bytes.len() > text.chars().count());
        assert_eq!(Utf8Codec.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn test_invalid_byte_reports_offset() {
        let err = Utf8Codec.decode(&[b'a', b'b', 0xff, b'c']).unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.codec, "utf-8");
    }

    #[test]
    fn test_truncated_multibyte_is_incomplete() {
        // "é" is 0xc3 0xa9; drop the continuation byte
        let err = Utf8Codec.decode(&[b'x', 0xc3]).unwrap_err();
        assert_eq!(err.offset, 1);
        assert!(err.reason.contains("incomplete"));
    }
}
