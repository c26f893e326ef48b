//! Entity streams and block serialization
//!
//! Each processed word feeds one or more of four streams:
//!
//! - PREDICTIONS: one marker bit per non-escaped word, 1 for a hit
//! - RANK: rank codes of hits, MSB first, zero padded to a byte
//! - DICTIONARY: 16-bit little-endian bucket reference per miss
//! - ENCODED: little-endian literal words, for misses and escaped words
//!
//! A flushed block is laid out as
//!
//! ```text
//! u16 LE   signature count
//! u32 LE   PREDICTIONS length
//! u32 LE   RANK length
//! u32 LE   DICTIONARY length
//! u32 LE   ENCODED length
//!          signature words
//!          PREDICTIONS | RANK | DICTIONARY | ENCODED
//! ```

use crate::hash::Word;
use crate::rank::{encode_rank, BitWriter};
use crate::signature::{Signature, SignatureRun};
use crate::{ArgonautError, Result, BLOCK_SIGNATURES, BUCKET_REFERENCE_SIZE};

/// Output channel identifiers, in serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// Hit markers
    Predictions = 0,
    /// Rank codes
    Rank = 1,
    /// Bucket references
    Dictionary = 2,
    /// Literal words
    Encoded = 3,
}

impl Entity {
    /// All entities in serialization order
    pub const ALL: [Entity; 4] = [
        Entity::Predictions,
        Entity::Rank,
        Entity::Dictionary,
        Entity::Encoded,
    ];
}

/// The four streams of the block being built
#[derive(Debug, Default)]
pub struct EntityStreams {
    predictions: Vec<u8>,
    prediction_count: usize,
    rank: BitWriter,
    dictionary: Vec<u8>,
    encoded: Vec<u8>,
}

impl EntityStreams {
    /// Create empty streams
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a predicted word
    pub fn push_hit(&mut self, rank: u8) {
        self.push_marker(true);
        encode_rank(rank, &mut self.rank);
    }

    /// Route a word that missed in `bucket`
    pub fn push_miss<W: Word>(&mut self, bucket: u16, word: W) {
        self.push_marker(false);
        self.dictionary.extend_from_slice(&bucket.to_le_bytes());
        word.write_le(&mut self.encoded);
    }

    /// Route a word of an escaped block
    pub fn push_escaped<W: Word>(&mut self, word: W) {
        word.write_le(&mut self.encoded);
    }

    fn push_marker(&mut self, hit: bool) {
        let bit = self.prediction_count % 8;
        if bit == 0 {
            self.predictions.push(0);
        }
        if hit {
            if let Some(byte) = self.predictions.last_mut() {
                *byte |= 1 << bit;
            }
        }
        self.prediction_count += 1;
    }

    /// Serialized length of one stream
    pub fn len(&self, entity: Entity) -> usize {
        match entity {
            Entity::Predictions => self.predictions.len(),
            Entity::Rank => self.rank.byte_len(),
            Entity::Dictionary => self.dictionary.len(),
            Entity::Encoded => self.encoded.len(),
        }
    }

    /// Serialized length of all four streams
    pub fn byte_len(&self) -> usize {
        Entity::ALL.iter().map(|&entity| self.len(entity)).sum()
    }

    /// True when nothing has been routed since the last clear
    pub fn is_empty(&self) -> bool {
        self.prediction_count == 0 && self.encoded.is_empty()
    }

    /// Serialize a block: header, signatures, then the four streams
    pub fn write_block(&self, signatures: &SignatureRun, out: &mut Vec<u8>) {
        out.extend_from_slice(&(signatures.len() as u16).to_le_bytes());
        for entity in Entity::ALL {
            out.extend_from_slice(&(self.len(entity) as u32).to_le_bytes());
        }
        signatures.write_to(out);
        out.extend_from_slice(&self.predictions);
        self.rank.write_to(out);
        out.extend_from_slice(&self.dictionary);
        out.extend_from_slice(&self.encoded);
    }

    /// Reset for the next block
    pub fn clear(&mut self) {
        self.predictions.clear();
        self.prediction_count = 0;
        self.rank.clear();
        self.dictionary.clear();
        self.encoded.clear();
    }
}

/// Forward-only reader over a compressed stream
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Take the next `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(ArgonautError::CorruptStream(format!(
                "needed {n} bytes at offset {}, only {} left",
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a little-endian u16
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True when every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// A parsed block whose streams borrow from the input
#[derive(Debug)]
pub struct BlockView<'a> {
    /// Signature run of the block
    pub signatures: SignatureRun,
    /// Hit markers
    pub predictions: &'a [u8],
    /// Rank codes
    pub rank: &'a [u8],
    /// Bucket references
    pub dictionary: &'a [u8],
    /// Literal words
    pub encoded: &'a [u8],
}

impl<'a> BlockView<'a> {
    /// Parse the next block and check its stream lengths against its signatures
    pub fn parse(cursor: &mut ByteCursor<'a>, word_bytes: usize) -> Result<Self> {
        let count = cursor.read_u16_le()? as usize;
        if count == 0 || count > BLOCK_SIGNATURES {
            return Err(ArgonautError::CorruptStream(format!(
                "block of {count} signatures"
            )));
        }

        let mut lengths = [0usize; 4];
        for length in &mut lengths {
            *length = cursor.read_u32_le()? as usize;
        }

        let signature_bytes = cursor.take(SignatureRun::byte_len_for(count))?;
        let signatures = SignatureRun::parse(signature_bytes, count)?;
        let block = Self {
            signatures,
            predictions: cursor.take(lengths[Entity::Predictions as usize])?,
            rank: cursor.take(lengths[Entity::Rank as usize])?,
            dictionary: cursor.take(lengths[Entity::Dictionary as usize])?,
            encoded: cursor.take(lengths[Entity::Encoded as usize])?,
        };
        block.check_lengths(word_bytes)?;
        Ok(block)
    }

    fn check_lengths(&self, word_bytes: usize) -> Result<()> {
        let (mut hits, mut misses, mut escaped) = (0usize, 0usize, 0usize);
        for signature in self.signatures.iter() {
            match signature? {
                Signature::Hit => hits += 1,
                Signature::Miss => misses += 1,
                Signature::Escaped => escaped += 1,
            }
        }

        let expected = [
            (
                Entity::Predictions,
                self.predictions.len(),
                (hits + misses).div_ceil(8),
            ),
            (
                Entity::Dictionary,
                self.dictionary.len(),
                misses * BUCKET_REFERENCE_SIZE,
            ),
            (
                Entity::Encoded,
                self.encoded.len(),
                (misses + escaped) * word_bytes,
            ),
        ];
        for (entity, actual, wanted) in expected {
            if actual != wanted {
                return Err(ArgonautError::CorruptStream(format!(
                    "{entity:?} stream is {actual} bytes, signatures call for {wanted}"
                )));
            }
        }
        if hits == 0 && !self.rank.is_empty() {
            return Err(ArgonautError::CorruptStream(
                "rank stream without hits".to_string(),
            ));
        }

        let used_bits = (hits + misses) % 8;
        let padding = self.predictions.last().map_or(0, |&last| last >> used_bits);
        if used_bits != 0 && padding != 0 {
            return Err(ArgonautError::CorruptStream(
                "nonzero padding after prediction markers".to_string(),
            ));
        }
        Ok(())
    }

    /// Hit marker of the `index`-th non-escaped word
    pub fn prediction(&self, index: usize) -> Result<bool> {
        let byte = self.predictions.get(index / 8).ok_or_else(|| {
            ArgonautError::CorruptStream(format!("prediction marker {index} missing"))
        })?;
        Ok((byte >> (index % 8)) & 1 == 1)
    }
}
