//! Word hashing for the Argonaut dictionary
//!
//! Words are hashed multiplicatively in their own width and the top
//! `hash_bits` bits of the product select a bucket. The same word and hash
//! width always select the same bucket, in every context.

use std::fmt::Debug;

/// Multiplier for 32-bit words
pub const HASH32_MULTIPLIER: u32 = 0x9D6E_F917;

/// Multiplier for 64-bit words
pub const HASH64_MULTIPLIER: u64 = 0x9D6E_F916_9D6E_F917;

/// Multiplicative hash of a 32-bit word into `hash_bits` bits
#[inline]
pub const fn hash32(word: u32, hash_bits: u32) -> usize {
    (word.wrapping_mul(HASH32_MULTIPLIER) >> (32 - hash_bits)) as usize
}

/// Multiplicative hash of a 64-bit word into `hash_bits` bits
#[inline]
pub const fn hash64(word: u64, hash_bits: u32) -> usize {
    (word.wrapping_mul(HASH64_MULTIPLIER) >> (64 - hash_bits)) as usize
}

/// A fixed-width input unit
pub trait Word: Copy + Eq + Default + Debug {
    /// Width in bytes
    const BYTES: usize;

    /// Read a word from exactly `Self::BYTES` little-endian bytes
    fn read_le(bytes: &[u8]) -> Self;

    /// Append the word's little-endian bytes
    fn write_le(self, out: &mut Vec<u8>);

    /// Bucket index in `[0, 2^hash_bits)`
    fn hash(self, hash_bits: u32) -> usize;
}

impl Word for u32 {
    const BYTES: usize = 4;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        u32::from_le_bytes(buf)
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn hash(self, hash_bits: u32) -> usize {
        hash32(self, hash_bits)
    }
}

impl Word for u64 {
    const BYTES: usize = 8;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        u64::from_le_bytes(buf)
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn hash(self, hash_bits: u32) -> usize {
        hash64(self, hash_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers_are_odd() {
        assert_eq!(HASH32_MULTIPLIER & 1, 1);
        assert_eq!(HASH64_MULTIPLIER & 1, 1);
    }

    #[test]
    fn test_hash_in_range() {
        for bits in 8..=16 {
            for word in [0u32, 1, 0xDEAD_BEEF, u32::MAX] {
                assert!(word.hash(bits) < 1 << bits);
            }
            for word in [0u64, 1, 0xDEAD_BEEF_CAFE_BABE, u64::MAX] {
                assert!(word.hash(bits) < 1 << bits);
            }
        }
    }

    #[test]
    fn test_hash_deterministic() {
        let word = u32::from_le_bytes(*b"abcd");
        let first = word.hash(12);
        for _ in 0..100 {
            assert_eq!(word.hash(12), first);
        }
        assert_eq!(hash32(word, 12), first);
    }

    #[test]
    fn test_hash_uses_top_bits() {
        let word = 0x1234_5678u32;
        let product = word.wrapping_mul(HASH32_MULTIPLIER);
        assert_eq!(word.hash(16), (product >> 16) as usize);
        assert_eq!(word.hash(8), (product >> 24) as usize);
    }

    #[test]
    fn test_hash_spreads_small_words() {
        // Consecutive small integers should not collapse into a handful of buckets
        let mut seen = std::collections::HashSet::new();
        for word in 0u32..1024 {
            seen.insert(word.hash(12));
        }
        assert!(seen.len() > 512, "only {} distinct buckets", seen.len());
    }

    #[test]
    fn test_word_bytes_round_trip() {
        let mut out = Vec::new();
        0x0403_0201u32.write_le(&mut out);
        assert_eq!(out, [1, 2, 3, 4]);
        assert_eq!(u32::read_le(&out), 0x0403_0201);

        out.clear();
        0x0807_0605_0403_0201u64.write_le(&mut out);
        assert_eq!(u64::read_le(&out), 0x0807_0605_0403_0201);
    }
}
