//! Round-trip verification
//!
//! Exercises a storage backend's ability to persist and return a text value
//! and an opaque binary value unchanged, and reports any divergence as a
//! [`VerificationResult`].

mod errors;
mod result;
mod verifier;

pub use errors::{VerifyError, VerifyResult};
pub use result::VerificationResult;
pub use verifier::{verify, RoundTripVerifier};
