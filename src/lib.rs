//! blobcheck - round-trip verification of text and binary columns
//!
//! Writes one record holding a text value both as text and as its encoded
//! bytes, reads it back, and reports whether either column changed.
//!
//! ```ignore
//! use blobcheck::backend::MemoryBackend;
//! use blobcheck::verify::verify;
//!
//! let result = verify("u1", "Ms. Foo Bar", &MemoryBackend::new())?;
//! assert!(result.is_match());
//! ```

pub mod backend;
pub mod cli;
pub mod codec;
pub mod observability;
pub mod verify;
