//! CRC32 checksums for file backend records
//!
//! Uses CRC32 (IEEE polynomial). Every read verifies the checksum.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        assert_eq!(compute_checksum(b"name_as_bytes"), compute_checksum(b"name_as_bytes"));
    }

    #[test]
    fn test_checksum_detects_single_bit_flip() {
        let mut data = b"Ms. Foo Bar".to_vec();
        let original = compute_checksum(&data);
        data[4] ^= 0x01;
        assert_ne!(original, compute_checksum(&data));
    }

    #[test]
    fn test_known_vector() {
        // Standard CRC32 check value
        assert_eq!(compute_checksum(b"123456789"), 0xCBF4_3926);
    }
}
