//! Key-indexed record holding a text column and a binary column

use crate::codec::Codec;

/// One logical row of the verification table.
///
/// When built through [`Record::encoded`], `binary_value` is the canonical
/// encoding of `text_value` under the codec in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Primary key
    pub key: String,
    /// Text column
    pub text_value: String,
    /// Opaque binary column
    pub binary_value: Vec<u8>,
}

impl Record {
    /// Create a record from raw column values
    pub fn new(key: impl Into<String>, text_value: impl Into<String>, binary_value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            text_value: text_value.into(),
            binary_value,
        }
    }

    /// Create a record whose binary column is the encoding of its text column
    pub fn encoded(key: impl Into<String>, text_value: impl Into<String>, codec: &dyn Codec) -> Self {
        let text_value = text_value.into();
        let binary_value = codec.encode(&text_value);
        Self::new(key, text_value, binary_value)
    }
}
