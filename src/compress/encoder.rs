//! Compression context
//!
//! An [`Encoder`] owns everything one compression run mutates: the
//! dictionary, the block manager, and the entity streams of the open block.

use crate::dictionary::{Dictionary, Prediction};
use crate::hash::Word;
use crate::signature::{BlockManager, BlockState, Signature};
use crate::streams::EntityStreams;
use crate::{ArgonautError, CompressionStats, Options, Result};

/// Word-by-word encoder for one stream
#[derive(Debug)]
pub struct Encoder<W: Word> {
    dictionary: Dictionary<W>,
    block: BlockManager,
    streams: EntityStreams,
    /// Previous word; selects the bucket for the next prediction
    context: W,
    stats: CompressionStats,
}

impl<W: Word> Encoder<W> {
    /// Create an encoder for `options`
    ///
    /// The options' word size must match `W`.
    pub fn new(options: &Options) -> Result<Self> {
        options.validate()?;
        if options.word_size.bytes() != W::BYTES {
            return Err(ArgonautError::InvalidWordSize(options.word_size as u8));
        }

        Ok(Self {
            dictionary: Dictionary::new(options)?,
            block: BlockManager::new(),
            streams: EntityStreams::new(),
            context: W::default(),
            stats: CompressionStats::default(),
        })
    }

    /// Statistics so far
    pub fn stats(&self) -> &CompressionStats {
        &self.stats
    }

    /// Encode one word, appending a block to `out` whenever one fills up
    pub fn encode_word(&mut self, word: W, out: &mut Vec<u8>) {
        match self.block.state() {
            BlockState::Escaped => {
                self.streams.push_escaped(word);
                self.block.record(Signature::Escaped);
                self.stats.escaped += 1;
            }
            BlockState::Predicting => match self.dictionary.predict(self.context, word) {
                Prediction::Hit { rank } => {
                    self.streams.push_hit(rank);
                    self.block.record(Signature::Hit);
                    self.stats.hits += 1;
                }
                Prediction::Miss { bucket } => {
                    self.streams.push_miss(bucket, word);
                    self.block.record(Signature::Miss);
                    self.stats.misses += 1;
                }
            },
        }
        self.context = word;
        self.stats.words += 1;

        if self
            .block
            .check_efficiency(self.streams.byte_len(), W::BYTES)
        {
            self.stats.escapes += 1;
        }
        if self.block.is_full() {
            self.flush_block(out);
        }
    }

    fn flush_block(&mut self, out: &mut Vec<u8>) {
        let start = out.len();
        self.streams.write_block(self.block.signatures(), out);
        log::trace!(
            "Flushed block {}: {} signatures, {} bytes{}",
            self.stats.blocks,
            self.block.len(),
            out.len() - start,
            if self.block.state() == BlockState::Escaped {
                " (escaped)"
            } else {
                ""
            }
        );

        self.block.reset();
        self.streams.clear();
        self.stats.blocks += 1;
    }

    /// Flush the open block, append the unaligned `tail`, and return the final statistics
    ///
    /// `out` must be the buffer every block was written to, header included.
    pub fn finish(mut self, tail: &[u8], out: &mut Vec<u8>) -> CompressionStats {
        if !self.block.is_empty() {
            self.flush_block(out);
        }
        out.extend_from_slice(tail);

        self.stats.input_bytes = (self.stats.words * W::BYTES + tail.len()) as u64;
        self.stats.output_bytes = out.len() as u64;
        log::debug!(
            "Compressed {} bytes to {} ({} hits, {} misses, {} escaped, {} blocks)",
            self.stats.input_bytes,
            self.stats.output_bytes,
            self.stats.hits,
            self.stats.misses,
            self.stats.escaped,
            self.stats.blocks
        );
        self.stats
    }
}
