//! Rank codec
//!
//! Ranks are written with the fixed prefix code from [`crate::tables`]. Bits
//! are packed most significant first, so reading a code bit by bit walks down
//! the code tree and a match is found after exactly `bits` reads.

use crate::tables::{MAX_CODE_BITS, RANK_CODES, RANK_DECODE};
use crate::{ArgonautError, Result};

/// MSB-first bit writer backed by a byte vector
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    /// Pending bits, right-aligned
    bit_buff: u32,
    /// Number of pending bits (always < 8 between calls)
    bit_count: u32,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `n_bits` bits of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, n_bits: u32) {
        debug_assert!(n_bits <= 24);
        self.bit_buff = (self.bit_buff << n_bits) | (value & ((1 << n_bits) - 1));
        self.bit_count += n_bits;

        while self.bit_count >= 8 {
            self.bit_count -= 8;
            self.bytes.push((self.bit_buff >> self.bit_count) as u8);
        }
        self.bit_buff &= (1 << self.bit_count) - 1;
    }

    /// Total number of bits written
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Size in bytes once padded to a byte boundary
    pub fn byte_len(&self) -> usize {
        self.bytes.len() + (self.bit_count > 0) as usize
    }

    /// Append the padded contents to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bytes);
        if self.bit_count > 0 {
            out.push((self.bit_buff << (8 - self.bit_count)) as u8);
        }
    }

    /// Pad to a byte boundary and return the bytes
    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        self.write_to(&mut out);
        out
    }

    /// Discard all bits
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.bit_buff = 0;
        self.bit_count = 0;
    }
}

/// MSB-first bit reader over a byte slice
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Position in bits
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read one bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<u32> {
        let byte = self.data.get(self.pos >> 3).ok_or_else(|| {
            ArgonautError::CorruptStream("rank stream truncated".to_string())
        })?;
        let bit = (byte >> (7 - (self.pos & 7))) & 1;
        self.pos += 1;
        Ok(bit as u32)
    }

    /// Number of bits consumed
    pub fn bit_pos(&self) -> usize {
        self.pos
    }

    /// Number of whole or partial bytes consumed
    pub fn bytes_consumed(&self) -> usize {
        self.pos.div_ceil(8)
    }

    /// Skip to the next byte boundary, requiring the skipped bits to be zero
    pub fn read_padding(&mut self) -> Result<()> {
        while self.pos % 8 != 0 {
            if self.read_bit()? != 0 {
                return Err(ArgonautError::CorruptStream(
                    "nonzero padding after rank codes".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Write the code for `rank`
#[inline]
pub fn encode_rank(rank: u8, writer: &mut BitWriter) {
    let code = RANK_CODES[rank as usize];
    writer.write_bits(code.pattern as u32, code.bits as u32);
}

/// Read one rank code
///
/// Consumes exactly the length of the matched code. Fails with
/// `CorruptStream` on truncation or if no code matches within
/// [`MAX_CODE_BITS`] bits.
pub fn decode_rank(reader: &mut BitReader<'_>) -> Result<u8> {
    // The marker bit separates equal patterns of different lengths
    let mut prefix = 1usize;
    for _ in 0..MAX_CODE_BITS {
        prefix = (prefix << 1) | reader.read_bit()? as usize;
        let entry = RANK_DECODE[prefix];
        if entry != 0 {
            return Ok((entry - 1) as u8);
        }
    }
    Err(ArgonautError::CorruptStream(format!(
        "no rank code matches {:011b}",
        prefix & ((1 << MAX_CODE_BITS) - 1)
    )))
}
