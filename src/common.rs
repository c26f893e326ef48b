//! Common types and constants for the Argonaut codec
//!
//! This module defines the core types, constants, and structures shared by the
//! compression and decompression paths.

use thiserror::Error;

/// Width of the words the predictor operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSize {
    /// 4-byte words, hashed in the 32-bit domain
    Word32 = 4,
    /// 8-byte words, hashed in the 64-bit domain
    Word64 = 8,
}

impl WordSize {
    /// Number of bytes per word
    pub fn bytes(&self) -> usize {
        *self as usize
    }

    /// Create a WordSize from its byte width
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            4 => Ok(WordSize::Word32),
            8 => Ok(WordSize::Word64),
            _ => Err(ArgonautError::InvalidWordSize(value)),
        }
    }
}

/// Codec parameters for one compression context
///
/// The parameters are written to the stream header, so a decoder never needs
/// to be told them out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Word width
    pub word_size: WordSize,
    /// log2 of the number of dictionary buckets
    pub hash_bits: u8,
    /// Maximum number of words kept per bucket
    pub bucket_depth: u16,
}

impl Options {
    /// Create options for the given word size with default table geometry
    pub fn new(word_size: WordSize) -> Self {
        Self {
            word_size,
            hash_bits: DEFAULT_HASH_BITS,
            bucket_depth: DEFAULT_BUCKET_DEPTH,
        }
    }

    /// Set the number of hash bits (8..=16)
    pub fn with_hash_bits(mut self, hash_bits: u8) -> Result<Self> {
        if !(MIN_HASH_BITS..=MAX_HASH_BITS).contains(&hash_bits) {
            return Err(ArgonautError::InvalidHashBits(hash_bits));
        }
        self.hash_bits = hash_bits;
        Ok(self)
    }

    /// Set the bucket depth (1..=256)
    pub fn with_bucket_depth(mut self, bucket_depth: u16) -> Result<Self> {
        if bucket_depth == 0 || bucket_depth > MAX_BUCKET_DEPTH {
            return Err(ArgonautError::InvalidBucketDepth(bucket_depth));
        }
        self.bucket_depth = bucket_depth;
        Ok(self)
    }

    /// Check that every field is in range
    pub fn validate(&self) -> Result<()> {
        if !(MIN_HASH_BITS..=MAX_HASH_BITS).contains(&self.hash_bits) {
            return Err(ArgonautError::InvalidHashBits(self.hash_bits));
        }
        if self.bucket_depth == 0 || self.bucket_depth > MAX_BUCKET_DEPTH {
            return Err(ArgonautError::InvalidBucketDepth(self.bucket_depth));
        }
        Ok(())
    }

    /// Number of dictionary buckets
    pub fn bucket_count(&self) -> usize {
        1 << self.hash_bits
    }

    /// Serialize as the stream header
    ///
    /// Fails on out-of-range fields, which the header cannot represent.
    pub fn to_header(&self) -> Result<[u8; STREAM_HEADER_SIZE]> {
        self.validate()?;
        Ok([
            self.word_size as u8,
            self.hash_bits,
            (self.bucket_depth - 1) as u8,
        ])
    }

    /// Parse and validate a stream header
    pub fn from_header(header: &[u8]) -> Result<Self> {
        if header.len() < STREAM_HEADER_SIZE {
            return Err(ArgonautError::CorruptStream(
                "stream header truncated".to_string(),
            ));
        }

        Options::new(WordSize::from_u8(header[0])?)
            .with_hash_bits(header[1])?
            .with_bucket_depth(header[2] as u16 + 1)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(WordSize::Word32)
    }
}

/// Error type for Argonaut operations
#[derive(Debug, Error)]
pub enum ArgonautError {
    /// Truncated input or a bit pattern no table entry matches
    #[error("Corrupt stream: {0}")]
    CorruptStream(String),

    /// A decoded rank, signature, or bucket reference outside its domain
    #[error("Invalid code: {0}")]
    InvalidCode(String),

    /// Caller-supplied output buffer is too small
    #[error("Output buffer too small: need {needed} bytes, have {available}")]
    OutputOverflow {
        /// Bytes required
        needed: usize,
        /// Bytes available
        available: usize,
    },

    /// Invalid word width
    #[error("Invalid word size: {0} (expected 4 or 8)")]
    InvalidWordSize(u8),

    /// Invalid number of hash bits
    #[error("Invalid hash bits: {0} (expected 8 to 16)")]
    InvalidHashBits(u8),

    /// Invalid bucket depth
    #[error("Invalid bucket depth: {0} (expected 1 to 256)")]
    InvalidBucketDepth(u16),
}

/// Result type alias for Argonaut operations
pub type Result<T> = std::result::Result<T, ArgonautError>;

// Argonaut constants

/// Number of signatures in a full block
pub const BLOCK_SIGNATURES: usize = 1 << 12; // 4096

/// Number of signatures between efficiency checks
pub const EFFICIENCY_CHECK_SIGNATURES: usize = 1 << 8; // 256

/// A window escapes once produced bytes reach this percentage of consumed bytes
pub const EFFICIENCY_THRESHOLD_PERCENT: usize = 98;

/// Default log2 bucket count
pub const DEFAULT_HASH_BITS: u8 = 12;

/// Default words kept per bucket
pub const DEFAULT_BUCKET_DEPTH: u16 = 64;

/// Smallest supported hash width
pub const MIN_HASH_BITS: u8 = 8;

/// Largest supported hash width (bucket references are 16-bit)
pub const MAX_HASH_BITS: u8 = 16;

/// Largest bucket depth, one entry per rank
pub const MAX_BUCKET_DEPTH: u16 = 256;

/// Stream header: word size, hash bits, bucket depth - 1
pub const STREAM_HEADER_SIZE: usize = 3;

/// Block header: signature count plus four stream lengths
pub const BLOCK_HEADER_SIZE: usize = 2 + 4 * 4;

/// Bytes per DICTIONARY stream entry
pub const BUCKET_REFERENCE_SIZE: usize = 2;

/// Upper bound on what a block adds on top of its input bytes
///
/// Covers the block header, a full signature run, a full predictions bitmap,
/// one efficiency window of bucket references, and rank stream padding.
pub const MAX_BLOCK_OVERHEAD: usize = BLOCK_HEADER_SIZE
    + BLOCK_SIGNATURES / 4
    + BLOCK_SIGNATURES / 8
    + EFFICIENCY_CHECK_SIGNATURES * BUCKET_REFERENCE_SIZE
    + 1;

/// Statistics for a compression run
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// Words processed
    pub words: usize,
    /// Words predicted from the dictionary
    pub hits: usize,
    /// Words emitted as dictionary literals
    pub misses: usize,
    /// Words emitted raw after an escape
    pub escaped: usize,
    /// Number of Predicting to Escaped transitions
    pub escapes: usize,
    /// Blocks flushed
    pub blocks: usize,
    /// Input bytes
    pub input_bytes: u64,
    /// Output bytes
    pub output_bytes: u64,
}

impl CompressionStats {
    /// Output size relative to input size
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}
