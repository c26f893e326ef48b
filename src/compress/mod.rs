//! Argonaut compression
//!
//! This module drives the per-word pipeline: hash the context, predict the
//! word, route the outcome into the entity streams, and flush a block every
//! 4096 signatures.

mod encoder;

pub use encoder::Encoder;

use crate::common::{MAX_BLOCK_OVERHEAD, STREAM_HEADER_SIZE};
use crate::hash::Word;
use crate::{ArgonautError, CompressionStats, Options, Result, WordSize, BLOCK_SIGNATURES};

/// Worst-case compressed size of `len` input bytes
///
/// Prediction stops paying for itself at most one efficiency window before a
/// block escapes, so every block adds at most [`MAX_BLOCK_OVERHEAD`] bytes.
pub fn compress_bound(len: usize, options: &Options) -> usize {
    let words = len / options.word_size.bytes();
    let blocks = words.div_ceil(BLOCK_SIGNATURES);
    STREAM_HEADER_SIZE + len + blocks * MAX_BLOCK_OVERHEAD
}

/// Compress `data` and report statistics
pub fn compress_bytes(data: &[u8], options: &Options) -> Result<(Vec<u8>, CompressionStats)> {
    options.validate()?;
    match options.word_size {
        WordSize::Word32 => compress_words::<u32>(data, options),
        WordSize::Word64 => compress_words::<u64>(data, options),
    }
}

/// Compress into a caller-supplied buffer, returning the number of bytes written
///
/// Nothing is written when the buffer is too small.
pub fn compress_into(data: &[u8], options: &Options, out: &mut [u8]) -> Result<usize> {
    let (compressed, _) = compress_bytes(data, options)?;
    if compressed.len() > out.len() {
        return Err(ArgonautError::OutputOverflow {
            needed: compressed.len(),
            available: out.len(),
        });
    }
    out[..compressed.len()].copy_from_slice(&compressed);
    Ok(compressed.len())
}

fn compress_words<W: Word>(
    data: &[u8],
    options: &Options,
) -> Result<(Vec<u8>, CompressionStats)> {
    let mut output = Vec::with_capacity(compress_bound(data.len(), options));
    output.extend_from_slice(&options.to_header()?);

    let mut encoder = Encoder::<W>::new(options)?;
    let words = data.chunks_exact(W::BYTES);
    let tail = words.remainder();
    for chunk in words {
        encoder.encode_word(W::read_le(chunk), &mut output);
    }

    let stats = encoder.finish(tail, &mut output);
    Ok((output, stats))
}
