//! Codec subsystem for blobcheck
//!
//! A codec converts a text value into the byte sequence stored in an opaque
//! binary column, and back.
//!
//! # Laws
//!
//! - `decode(encode(x)) == x` for every representable `x`
//! - `encode` is total and injective
//! - `decode` fails with [`DecodeError`] on bytes outside the encoding

mod errors;
mod utf8;

pub use errors::{DecodeError, DecodeResult};
pub use utf8::Utf8Codec;

/// Text <-> bytes conversion used by the verifier.
pub trait Codec: Send + Sync + std::fmt::Debug {
    /// Short stable name, used in logs and reports
    fn name(&self) -> &'static str;

    /// Encode text into its canonical byte representation
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Decode bytes produced by [`Codec::encode`]
    fn decode(&self, bytes: &[u8]) -> DecodeResult<String>;
}

/// Render bytes as lowercase hex, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}
