//! Argonaut decompression
//!
//! The stream does not record its own length; callers pass the size of the
//! original input, which fixes the number of words, the signature count of
//! every block, and the length of the raw tail.

mod decoder;

pub use decoder::Decoder;

use crate::hash::Word;
use crate::streams::{BlockView, ByteCursor};
use crate::{ArgonautError, Options, Result, WordSize, BLOCK_SIGNATURES, STREAM_HEADER_SIZE};

/// Upper bound on bytes produced per compressed byte, used to cap preallocation
const MAX_EXPANSION: usize = 16;

/// Decompress a stream holding `expected_size` original bytes
pub fn decompress_bytes(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let options = Options::from_header(data)?;
    let mut cursor = ByteCursor::new(data);
    cursor.take(STREAM_HEADER_SIZE)?;

    let mut output = Vec::with_capacity(expected_size.min(data.len() * MAX_EXPANSION));
    match options.word_size {
        WordSize::Word32 => {
            decompress_words::<u32>(&mut cursor, &options, expected_size, &mut output)?
        }
        WordSize::Word64 => {
            decompress_words::<u64>(&mut cursor, &options, expected_size, &mut output)?
        }
    }

    if !cursor.is_empty() {
        return Err(ArgonautError::CorruptStream(format!(
            "{} trailing bytes after the stream",
            cursor.remaining()
        )));
    }
    Ok(output)
}

/// Decompress into a caller-supplied buffer, returning the number of bytes written
///
/// Nothing is written when the buffer cannot hold `expected_size` bytes.
pub fn decompress_into(data: &[u8], expected_size: usize, out: &mut [u8]) -> Result<usize> {
    if out.len() < expected_size {
        return Err(ArgonautError::OutputOverflow {
            needed: expected_size,
            available: out.len(),
        });
    }
    let decompressed = decompress_bytes(data, expected_size)?;
    out[..decompressed.len()].copy_from_slice(&decompressed);
    Ok(decompressed.len())
}

fn decompress_words<W: Word>(
    cursor: &mut ByteCursor<'_>,
    options: &Options,
    expected_size: usize,
    output: &mut Vec<u8>,
) -> Result<()> {
    let mut decoder = Decoder::<W>::new(options)?;
    let mut remaining = expected_size / W::BYTES;

    while remaining > 0 {
        let block = BlockView::parse(cursor, W::BYTES)?;
        let expected = remaining.min(BLOCK_SIGNATURES);
        if block.signatures.len() != expected {
            return Err(ArgonautError::CorruptStream(format!(
                "block of {} signatures where {expected} were expected",
                block.signatures.len()
            )));
        }
        decoder.decode_block(&block, output)?;
        remaining -= expected;
    }

    output.extend_from_slice(cursor.take(expected_size % W::BYTES)?);
    Ok(())
}
