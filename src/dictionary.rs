//! Recency-ranked word dictionary
//!
//! Each bucket holds up to `bucket_depth` words ordered from most to least
//! recently used. The bucket consulted for a word is selected by hashing the
//! word that preceded it, so the decoder can find the same bucket without
//! side information. The position of a word inside its bucket is its rank.

use crate::hash::Word;
use crate::{ArgonautError, Options, Result};

/// Outcome of predicting one word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// The word was found at `rank` and promoted to rank 0
    Hit {
        /// Rank before promotion
        rank: u8,
    },
    /// The word was not in the bucket and has been inserted
    Miss {
        /// Bucket the word was inserted into
        bucket: u16,
    },
}

/// Per-context dictionary of recently seen words
#[derive(Debug)]
pub struct Dictionary<W: Word> {
    hash_bits: u32,
    depth: usize,
    /// Bucket `b` occupies `entries[b * depth..(b + 1) * depth]`, freshest first
    entries: Vec<W>,
    /// Occupied slots per bucket
    lengths: Vec<u16>,
}

impl<W: Word> Dictionary<W> {
    /// Create an empty dictionary
    ///
    /// Fails if the options' hash bits or bucket depth are out of range.
    pub fn new(options: &Options) -> Result<Self> {
        options.validate()?;
        let buckets = options.bucket_count();
        let depth = options.bucket_depth as usize;
        Ok(Self {
            hash_bits: options.hash_bits as u32,
            depth,
            entries: vec![W::default(); buckets * depth],
            lengths: vec![0; buckets],
        })
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.lengths.len()
    }

    /// Bucket selected by a context word
    #[inline]
    pub fn bucket(&self, context: W) -> usize {
        context.hash(self.hash_bits)
    }

    /// Words currently held by a bucket, freshest first
    pub fn entries(&self, bucket: usize) -> &[W] {
        let start = bucket * self.depth;
        &self.entries[start..start + self.lengths[bucket] as usize]
    }

    /// Predict `word` in the bucket selected by `context`
    ///
    /// A hit promotes the word to rank 0. A miss learns the word exactly as
    /// [`Dictionary::learn`] does.
    pub fn predict(&mut self, context: W, word: W) -> Prediction {
        let bucket = self.bucket(context);
        match self.find(bucket, word) {
            Some(rank) => {
                self.promote(bucket, rank);
                Prediction::Hit { rank: rank as u8 }
            }
            None => {
                self.learn_in(bucket, word);
                Prediction::Miss {
                    bucket: bucket as u16,
                }
            }
        }
    }

    /// Fetch the word at `rank` in the bucket selected by `context` and promote it
    pub fn resolve(&mut self, context: W, rank: u8) -> Result<W> {
        let bucket = self.bucket(context);
        let rank = rank as usize;
        if rank >= self.lengths[bucket] as usize {
            return Err(ArgonautError::InvalidCode(format!(
                "rank {rank} past the {} entries of bucket {bucket}",
                self.lengths[bucket]
            )));
        }
        let word = self.entries[bucket * self.depth + rank];
        self.promote(bucket, rank);
        Ok(word)
    }

    /// Record a word that missed in the bucket selected by `context`
    pub fn learn(&mut self, context: W, word: W) {
        let bucket = self.bucket(context);
        self.learn_in(bucket, word);
    }

    /// Insert into the context bucket, then seed the word's own bucket so an
    /// immediate repeat is predicted at rank 0
    fn learn_in(&mut self, bucket: usize, word: W) {
        self.insert(bucket, word);
        let own = self.bucket(word);
        match self.find(own, word) {
            Some(rank) => self.promote(own, rank),
            None => self.insert(own, word),
        }
    }

    fn find(&self, bucket: usize, word: W) -> Option<usize> {
        self.entries(bucket).iter().position(|&entry| entry == word)
    }

    /// Move the entry at `rank` to the front, shifting fresher entries back
    fn promote(&mut self, bucket: usize, rank: usize) {
        if rank == 0 {
            return;
        }
        let start = bucket * self.depth;
        self.entries[start..=start + rank].rotate_right(1);
    }

    /// Insert at rank 0, evicting the oldest entry of a full bucket
    fn insert(&mut self, bucket: usize, word: W) {
        let start = bucket * self.depth;
        let len = &mut self.lengths[bucket];
        if (*len as usize) < self.depth {
            *len += 1;
        }
        let len = *len as usize;
        let slots = &mut self.entries[start..start + len];
        slots.rotate_right(1);
        slots[0] = word;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WordSize;

    fn small_options(depth: u16) -> Options {
        Options::new(WordSize::Word32)
            .with_hash_bits(8)
            .unwrap()
            .with_bucket_depth(depth)
            .unwrap()
    }

    /// Find a word whose bucket differs from `avoid`, starting from `seed`
    fn word_outside(dict: &Dictionary<u32>, avoid: usize, seed: u32) -> u32 {
        (seed..).find(|&w| dict.bucket(w) != avoid).unwrap()
    }

    #[test]
    fn test_miss_then_hit() {
        let mut dict = Dictionary::<u32>::new(&small_options(4)).unwrap();
        let context = 7u32;
        let word = 0xCAFE_F00D;

        let bucket = dict.bucket(context) as u16;
        assert_eq!(dict.predict(context, word), Prediction::Miss { bucket });
        assert_eq!(dict.predict(context, word), Prediction::Hit { rank: 0 });
    }

    #[test]
    fn test_move_to_front() {
        let mut dict = Dictionary::<u32>::new(&small_options(4)).unwrap();
        let context = 1u32;
        let bucket = dict.bucket(context);

        // Pick words that seed other buckets so the context bucket only sees inserts
        let a = word_outside(&dict, bucket, 100);
        let b = word_outside(&dict, bucket, a + 1);
        let c = word_outside(&dict, bucket, b + 1);

        for w in [a, b, c] {
            assert!(matches!(dict.predict(context, w), Prediction::Miss { .. }));
        }
        assert_eq!(dict.entries(bucket), &[c, b, a]);

        assert_eq!(dict.predict(context, a), Prediction::Hit { rank: 2 });
        assert_eq!(dict.entries(bucket), &[a, c, b]);

        assert_eq!(dict.predict(context, b), Prediction::Hit { rank: 2 });
        assert_eq!(dict.entries(bucket), &[b, a, c]);
    }

    #[test]
    fn test_eviction_of_oldest() {
        let mut dict = Dictionary::<u32>::new(&small_options(2)).unwrap();
        let context = 3u32;
        let bucket = dict.bucket(context);

        let a = word_outside(&dict, bucket, 1000);
        let b = word_outside(&dict, bucket, a + 1);
        let c = word_outside(&dict, bucket, b + 1);

        dict.predict(context, a);
        dict.predict(context, b);
        dict.predict(context, c);
        assert_eq!(dict.entries(bucket), &[c, b]);
        assert!(matches!(dict.predict(context, a), Prediction::Miss { .. }));
    }

    #[test]
    fn test_miss_seeds_own_bucket() {
        let mut dict = Dictionary::<u32>::new(&small_options(4)).unwrap();
        let word = 0x1234_5678u32;

        dict.predict(0, word);
        // The word is now the freshest prediction for its own context
        assert_eq!(dict.predict(word, word), Prediction::Hit { rank: 0 });
    }

    #[test]
    fn test_resolve_matches_predict() {
        let options = small_options(8);
        let mut encoder = Dictionary::<u32>::new(&options).unwrap();
        let mut decoder = Dictionary::<u32>::new(&options).unwrap();

        let words = [5u32, 9, 5, 5, 12, 9, 5, 12, 12, 7, 5];
        let mut context = 0u32;
        for &word in &words {
            match encoder.predict(context, word) {
                Prediction::Hit { rank } => {
                    assert_eq!(decoder.resolve(context, rank).unwrap(), word);
                }
                Prediction::Miss { bucket } => {
                    assert_eq!(decoder.bucket(context), bucket as usize);
                    decoder.learn(context, word);
                }
            }
            context = word;
        }
        for bucket in 0..encoder.bucket_count() {
            assert_eq!(encoder.entries(bucket), decoder.entries(bucket));
        }
    }

    #[test]
    fn test_rejects_out_of_range_geometry() {
        for bucket_depth in [0, 257] {
            let options = Options {
                word_size: WordSize::Word32,
                hash_bits: 12,
                bucket_depth,
            };
            assert!(matches!(
                Dictionary::<u32>::new(&options),
                Err(ArgonautError::InvalidBucketDepth(depth)) if depth == bucket_depth
            ));
        }

        let options = Options {
            word_size: WordSize::Word64,
            hash_bits: 17,
            bucket_depth: 64,
        };
        assert!(matches!(
            Dictionary::<u64>::new(&options),
            Err(ArgonautError::InvalidHashBits(17))
        ));
    }

    #[test]
    fn test_resolve_rejects_empty_rank() {
        let mut dict = Dictionary::<u64>::new(&Options::new(WordSize::Word64)).unwrap();
        assert!(matches!(
            dict.resolve(42, 0),
            Err(ArgonautError::InvalidCode(_))
        ));
    }
}
