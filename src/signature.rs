//! Signatures and block management
//!
//! Every processed word leaves a 2-bit signature recording whether it was
//! predicted, stored as a literal, or written raw after an escape. Signatures
//! are packed 32 to a 64-bit signature word. The block manager owns the
//! signature run of the current block and decides, once per efficiency
//! window, whether prediction still pays for itself.

use crate::{
    ArgonautError, Result, BLOCK_SIGNATURES, EFFICIENCY_CHECK_SIGNATURES,
    EFFICIENCY_THRESHOLD_PERCENT,
};

/// Packed signature word
pub type SignatureWord = u64;

/// Bits per signature
pub const SIGNATURE_BITS: usize = 2;

/// Signatures per signature word
pub const SIGNATURES_PER_WORD: usize = SignatureWord::BITS as usize / SIGNATURE_BITS;

/// Outcome of processing one word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// Not in the dictionary; literal and bucket reference emitted
    Miss = 0b00,
    /// Predicted; rank code emitted
    Hit = 0b01,
    /// Written raw because the block escaped
    Escaped = 0b10,
}

impl Signature {
    /// Decode a 2-bit signature value
    pub fn from_bits(bits: u64) -> Result<Self> {
        match bits {
            0b00 => Ok(Signature::Miss),
            0b01 => Ok(Signature::Hit),
            0b10 => Ok(Signature::Escaped),
            _ => Err(ArgonautError::InvalidCode(format!(
                "unknown signature {bits:#04b}"
            ))),
        }
    }
}

/// Signatures of one block, packed least significant bits first
#[derive(Debug, Default, Clone)]
pub struct SignatureRun {
    words: Vec<SignatureWord>,
    len: usize,
}

impl SignatureRun {
    /// Create an empty run
    pub fn new() -> Self {
        Self {
            words: Vec::with_capacity(BLOCK_SIGNATURES / SIGNATURES_PER_WORD),
            len: 0,
        }
    }

    /// Append a signature
    pub fn push(&mut self, signature: Signature) {
        let slot = self.len % SIGNATURES_PER_WORD;
        if slot == 0 {
            self.words.push(0);
        }
        if let Some(word) = self.words.last_mut() {
            *word |= (signature as SignatureWord) << (slot * SIGNATURE_BITS);
        }
        self.len += 1;
    }

    /// Signature at `index`
    pub fn get(&self, index: usize) -> Result<Signature> {
        if index >= self.len {
            return Err(ArgonautError::CorruptStream(format!(
                "signature {index} past the end of a run of {}",
                self.len
            )));
        }
        let word = self.words[index / SIGNATURES_PER_WORD];
        let shift = (index % SIGNATURES_PER_WORD) * SIGNATURE_BITS;
        Signature::from_bits((word >> shift) & 0b11)
    }

    /// Iterate over all signatures
    pub fn iter(&self) -> impl Iterator<Item = Result<Signature>> + '_ {
        (0..self.len).map(move |index| self.get(index))
    }

    /// Number of signatures
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no signature has been recorded
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Serialized size in bytes
    pub fn byte_len(&self) -> usize {
        Self::byte_len_for(self.len)
    }

    /// Serialized size of a run of `count` signatures
    pub fn byte_len_for(count: usize) -> usize {
        count.div_ceil(SIGNATURES_PER_WORD) * std::mem::size_of::<SignatureWord>()
    }

    /// Append the signature words, little-endian
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for word in &self.words {
            out.extend_from_slice(&word.to_le_bytes());
        }
    }

    /// Rebuild a run of `count` signatures from its serialized form
    pub fn parse(bytes: &[u8], count: usize) -> Result<Self> {
        if bytes.len() != Self::byte_len_for(count) {
            return Err(ArgonautError::CorruptStream(format!(
                "{} signature bytes for {count} signatures",
                bytes.len()
            )));
        }
        let words = bytes
            .chunks_exact(std::mem::size_of::<SignatureWord>())
            .map(|chunk| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                SignatureWord::from_le_bytes(buf)
            })
            .collect();
        Ok(Self { words, len: count })
    }

    /// Discard all signatures
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }
}

/// Per-block encoding state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Words go through the predictor
    Predicting,
    /// Words bypass the predictor until the block ends
    Escaped,
}

/// Tracks the signature run and escape state of the block being built
#[derive(Debug)]
pub struct BlockManager {
    state: BlockState,
    signatures: SignatureRun,
}

impl BlockManager {
    /// Create a manager positioned at the start of a block
    pub fn new() -> Self {
        Self {
            state: BlockState::Predicting,
            signatures: SignatureRun::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Signatures recorded in this block
    pub fn signatures(&self) -> &SignatureRun {
        &self.signatures
    }

    /// Number of signatures recorded in this block
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// True when the block holds no signatures
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// True when the block must be flushed
    pub fn is_full(&self) -> bool {
        self.signatures.len() >= BLOCK_SIGNATURES
    }

    /// Record the outcome of one word
    pub fn record(&mut self, signature: Signature) {
        debug_assert!(
            self.state == BlockState::Predicting || signature == Signature::Escaped,
            "predicted word recorded in an escaped block"
        );
        self.signatures.push(signature);
    }

    /// Sample efficiency at the end of each window
    ///
    /// `stream_bytes` is the size of the four entity streams of this block.
    /// Returns true if the block switched to `Escaped`.
    pub fn check_efficiency(&mut self, stream_bytes: usize, word_bytes: usize) -> bool {
        let len = self.signatures.len();
        if self.state != BlockState::Predicting
            || len == 0
            || len % EFFICIENCY_CHECK_SIGNATURES != 0
            || len >= BLOCK_SIGNATURES
        {
            return false;
        }

        let produced = stream_bytes + self.signatures.byte_len();
        let consumed = len * word_bytes;
        if produced * 100 < consumed * EFFICIENCY_THRESHOLD_PERCENT {
            return false;
        }

        log::debug!(
            "Escaping after {} signatures: {} bytes produced for {} consumed",
            len,
            produced,
            consumed
        );
        self.state = BlockState::Escaped;
        true
    }

    /// Start the next block; dictionary state lives elsewhere and is untouched
    pub fn reset(&mut self) {
        self.state = BlockState::Predicting;
        self.signatures.clear();
    }
}

impl Default for BlockManager {
    fn default() -> Self {
        Self::new()
    }
}
