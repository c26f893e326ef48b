//! Argonaut - word-predictive block compression
//!
//! Argonaut splits its input into fixed-width words and predicts each one from
//! a recency-ranked dictionary selected by the word before it. Predicted words
//! cost a short prefix code for their rank; unpredicted words are stored as
//! literals. When prediction stops paying for itself, the rest of the block is
//! stored raw.
//!
//! # Features
//!
//! - 32-bit and 64-bit words
//! - Configurable dictionary geometry, recorded in the stream header
//! - Per-block escape to raw storage, with a hard bound on expansion
//! - Every decoded code is validated; corrupt input yields an error, never a panic
//!
//! # Example
//!
//! ```
//! use argonaut::{compress_with, decompress, Options, WordSize};
//!
//! let data = b"ping pong ping pong ping pong ping pong ".repeat(64);
//! let options = Options::new(WordSize::Word32);
//! let compressed = compress_with(&data, &options)?;
//! assert!(compressed.len() < data.len());
//!
//! // The stream does not carry the original length
//! let restored = decompress(&compressed, data.len())?;
//! assert_eq!(restored, data);
//! # Ok::<(), argonaut::ArgonautError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod compress;
pub mod decompress;
pub mod dictionary;
pub mod error;
pub mod hash;
pub mod rank;
pub mod signature;
pub mod streams;
pub mod tables;

// Re-export commonly used types
pub use common::{
    ArgonautError, CompressionStats, Options, Result, WordSize, BLOCK_HEADER_SIZE,
    BLOCK_SIGNATURES, BUCKET_REFERENCE_SIZE, DEFAULT_BUCKET_DEPTH, DEFAULT_HASH_BITS,
    EFFICIENCY_CHECK_SIGNATURES, EFFICIENCY_THRESHOLD_PERCENT, MAX_BLOCK_OVERHEAD,
    MAX_BUCKET_DEPTH, MAX_HASH_BITS, MIN_HASH_BITS, STREAM_HEADER_SIZE,
};
pub use compress::{compress_bound, Encoder};
pub use decompress::Decoder;
pub use dictionary::{Dictionary, Prediction};
pub use hash::Word;
pub use rank::{decode_rank, encode_rank, BitReader, BitWriter};
pub use signature::{BlockManager, BlockState, Signature, SignatureRun};
pub use streams::{Entity, EntityStreams};
pub use tables::{RankCode, RANK_CODES};

// Convenience functions

/// Compress data with default options (32-bit words)
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &Options::default())
}

/// Compress data with the given options
pub fn compress_with(data: &[u8], options: &Options) -> Result<Vec<u8>> {
    compress::compress_bytes(data, options).map(|(compressed, _)| compressed)
}

/// Compress data and report what the predictor did
pub fn compress_with_stats(
    data: &[u8],
    options: &Options,
) -> Result<(Vec<u8>, CompressionStats)> {
    compress::compress_bytes(data, options)
}

/// Compress into `out`, returning the compressed size
///
/// A buffer of [`compress_bound`] bytes is always large enough.
pub fn compress_into(data: &[u8], options: &Options, out: &mut [u8]) -> Result<usize> {
    compress::compress_into(data, options, out)
}

/// Decompress a stream of `expected_size` original bytes
///
/// # Arguments
/// * `data` - The compressed stream, header included
/// * `expected_size` - Length of the original input
///
/// # Returns
/// A vector containing the decompressed data
pub fn decompress(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    decompress::decompress_bytes(data, expected_size)
}

/// Decompress into `out`, returning the number of bytes written
pub fn decompress_into(data: &[u8], expected_size: usize, out: &mut [u8]) -> Result<usize> {
    decompress::decompress_into(data, expected_size, out)
}
