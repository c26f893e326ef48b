//! Decompression context

use crate::dictionary::Dictionary;
use crate::hash::Word;
use crate::rank::{decode_rank, BitReader};
use crate::signature::Signature;
use crate::streams::{BlockView, ByteCursor};
use crate::{ArgonautError, Options, Result, EFFICIENCY_CHECK_SIGNATURES};

/// Block-by-block decoder for one stream
///
/// Mirrors the encoder's dictionary updates exactly, so both sides hold the
/// same bucket contents after every word.
#[derive(Debug)]
pub struct Decoder<W: Word> {
    dictionary: Dictionary<W>,
    context: W,
}

impl<W: Word> Decoder<W> {
    /// Create a decoder for `options`
    pub fn new(options: &Options) -> Result<Self> {
        options.validate()?;
        if options.word_size.bytes() != W::BYTES {
            return Err(ArgonautError::InvalidWordSize(options.word_size as u8));
        }

        Ok(Self {
            dictionary: Dictionary::new(options)?,
            context: W::default(),
        })
    }

    /// Decode every word of `block`, appending their bytes to `out`
    pub fn decode_block(&mut self, block: &BlockView<'_>, out: &mut Vec<u8>) -> Result<()> {
        let mut rank = BitReader::new(block.rank);
        let mut dictionary = ByteCursor::new(block.dictionary);
        let mut encoded = ByteCursor::new(block.encoded);
        let mut marker = 0usize;
        let mut escaped = false;

        for (index, signature) in block.signatures.iter().enumerate() {
            let signature = signature?;
            if escaped && signature != Signature::Escaped {
                return Err(ArgonautError::CorruptStream(format!(
                    "{signature:?} signature {index} follows an escape"
                )));
            }

            let word = match signature {
                Signature::Escaped => {
                    // Escapes only begin where an efficiency window ends
                    if !escaped && (index == 0 || index % EFFICIENCY_CHECK_SIGNATURES != 0) {
                        return Err(ArgonautError::CorruptStream(format!(
                            "escape begins at signature {index}"
                        )));
                    }
                    escaped = true;
                    W::read_le(encoded.take(W::BYTES)?)
                }
                Signature::Hit => {
                    self.expect_marker(block, marker, true)?;
                    marker += 1;
                    let code = decode_rank(&mut rank)?;
                    self.dictionary.resolve(self.context, code)?
                }
                Signature::Miss => {
                    self.expect_marker(block, marker, false)?;
                    marker += 1;
                    self.check_bucket(dictionary.read_u16_le()?)?;
                    let word = W::read_le(encoded.take(W::BYTES)?);
                    self.dictionary.learn(self.context, word);
                    word
                }
            };

            word.write_le(out);
            self.context = word;
        }

        rank.read_padding()?;
        if rank.bytes_consumed() != block.rank.len() {
            return Err(ArgonautError::CorruptStream(format!(
                "rank stream is {} bytes, codes used {}",
                block.rank.len(),
                rank.bytes_consumed()
            )));
        }
        debug_assert!(dictionary.is_empty() && encoded.is_empty());
        Ok(())
    }

    fn expect_marker(&self, block: &BlockView<'_>, index: usize, hit: bool) -> Result<()> {
        if block.prediction(index)? != hit {
            return Err(ArgonautError::CorruptStream(format!(
                "prediction marker {index} disagrees with its signature"
            )));
        }
        Ok(())
    }

    /// A bucket reference must name the bucket the context selects
    fn check_bucket(&self, bucket: u16) -> Result<()> {
        let bucket = bucket as usize;
        if bucket >= self.dictionary.bucket_count() {
            return Err(ArgonautError::InvalidCode(format!(
                "bucket {bucket} out of {} buckets",
                self.dictionary.bucket_count()
            )));
        }
        let expected = self.dictionary.bucket(self.context);
        if bucket != expected {
            return Err(ArgonautError::InvalidCode(format!(
                "bucket reference {bucket}, context selects {expected}"
            )));
        }
        Ok(())
    }
}
