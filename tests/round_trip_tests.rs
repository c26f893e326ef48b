//! Round-trip tests for Argonaut compression and decompression
//!
//! These tests cover block boundaries, unaligned tails, both word sizes, the
//! escape path, and rejection of damaged streams.

use argonaut::{
    compress, compress_bound, compress_into, compress_with, compress_with_stats, decompress,
    decompress_into, ArgonautError, Options, WordSize, BLOCK_SIGNATURES,
    EFFICIENCY_CHECK_SIGNATURES,
};

/// Deterministic pseudo-random bytes (64-bit LCG, high byte of each step)
fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 56) as u8
        })
        .collect()
}

/// Text-like input with plenty of repeated words
fn text(len: usize) -> Vec<u8> {
    b"Argonaut predicts each word from the word before it; repeated phrases cost a few bits. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

fn all_word_sizes() -> [Options; 2] {
    [Options::new(WordSize::Word32), Options::new(WordSize::Word64)]
}

fn check_round_trip(
    data: &[u8],
    options: &Options,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let compressed = compress_with(data, options)?;
    let decompressed = decompress(&compressed, data.len())?;
    assert_eq!(
        data,
        &decompressed[..],
        "Round-trip failed for {} bytes with {:?}",
        data.len(),
        options
    );
    assert!(compressed.len() <= compress_bound(data.len(), options));
    Ok(compressed)
}

/// Test empty input
#[test]
fn test_empty_input() -> Result<(), Box<dyn std::error::Error>> {
    for options in all_word_sizes() {
        let compressed = check_round_trip(&[], &options)?;
        // Header only
        assert_eq!(compressed, options.to_header()?);
    }
    Ok(())
}

/// Test inputs shorter than one word
#[test]
fn test_tail_only() -> Result<(), Box<dyn std::error::Error>> {
    for options in all_word_sizes() {
        for len in 1..options.word_size.bytes() {
            let data = noise(len, len as u64);
            let compressed = check_round_trip(&data, &options)?;
            assert_eq!(&compressed[3..], &data[..]);
        }
    }
    Ok(())
}

/// Test a single word
#[test]
fn test_single_word() -> Result<(), Box<dyn std::error::Error>> {
    check_round_trip(b"WORD", &Options::new(WordSize::Word32))?;
    check_round_trip(b"LONGWORD", &Options::new(WordSize::Word64))?;
    Ok(())
}

/// Test inputs around the block boundary
#[test]
fn test_block_boundaries() -> Result<(), Box<dyn std::error::Error>> {
    for options in all_word_sizes() {
        let block_bytes = BLOCK_SIGNATURES * options.word_size.bytes();
        for len in [
            block_bytes - options.word_size.bytes(),
            block_bytes,
            block_bytes + 1,
            block_bytes + options.word_size.bytes(),
        ] {
            let (compressed, stats) = compress_with_stats(&text(len), &options)?;
            assert_eq!(decompress(&compressed, len)?, text(len));
            let words = len / options.word_size.bytes();
            assert_eq!(stats.blocks, words.div_ceil(BLOCK_SIGNATURES));
        }
    }
    Ok(())
}

/// Test multi-block inputs with unaligned tails for both word sizes
#[test]
fn test_multi_block() -> Result<(), Box<dyn std::error::Error>> {
    for options in all_word_sizes() {
        for len in [100_003, 250_001, 262_151] {
            let data = text(len);
            let compressed = check_round_trip(&data, &options)?;
            assert!(
                compressed.len() < data.len() / 2,
                "{:?}: {} -> {}",
                options.word_size,
                data.len(),
                compressed.len()
            );
        }
    }
    Ok(())
}

/// Test non-default dictionary geometry
#[test]
fn test_dictionary_geometry() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = text(50_000);
    data.extend(noise(20_000, 7));
    data.extend(text(30_001));

    for hash_bits in [8, 12, 16] {
        for bucket_depth in [1, 2, 64, 256] {
            let options = Options::new(WordSize::Word32)
                .with_hash_bits(hash_bits)?
                .with_bucket_depth(bucket_depth)?;
            let compressed = check_round_trip(&data, &options)?;
            assert_eq!(&compressed[..3], &[4, hash_bits, (bucket_depth - 1) as u8]);
        }
    }
    Ok(())
}

/// Test that a repeated word is stored once and then predicted
#[test]
fn test_repeated_word() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"ABCD".repeat(10_000);
    let (compressed, stats) = compress_with_stats(&data, &Options::default())?;

    assert_eq!(stats.words, 10_000);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 9_999);
    assert_eq!(stats.escapes, 0);
    assert!(compressed.len() < 10_000);
    assert!(stats.compression_ratio() < 0.25);
    assert_eq!(decompress(&compressed, data.len())?, data);
    Ok(())
}

/// Test that high-entropy input escapes and stays within the bound
#[test]
fn test_random_data_escapes() -> Result<(), Box<dyn std::error::Error>> {
    for options in all_word_sizes() {
        let data = noise(200_001, 0x5EED);
        let (compressed, stats) = compress_with_stats(&data, &options)?;

        assert!(stats.escapes >= 1);
        assert!(stats.escaped > stats.words / 2);
        // Every block gives up after its first window
        assert_eq!(stats.escapes, stats.blocks);
        assert_eq!(
            stats.hits + stats.misses,
            stats.escapes * EFFICIENCY_CHECK_SIGNATURES
        );
        assert!(compressed.len() <= compress_bound(data.len(), &options));
        assert_eq!(decompress(&compressed, data.len())?, data);
    }
    Ok(())
}

/// Test input that alternates between predictable and random stretches
#[test]
fn test_mixed_content() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = Vec::new();
    for round in 0..6 {
        data.extend(text(40_000));
        data.extend(noise(30_000, round));
    }
    for options in all_word_sizes() {
        let (compressed, stats) = compress_with_stats(&data, &options)?;
        assert!(stats.escapes >= 1);
        assert!(stats.hits > 0);
        assert_eq!(decompress(&compressed, data.len())?, data);
    }
    Ok(())
}

/// Test compressing into a caller buffer
#[test]
fn test_compress_into() -> Result<(), Box<dyn std::error::Error>> {
    let data = text(10_000);
    let options = Options::default();

    let mut buffer = vec![0u8; compress_bound(data.len(), &options)];
    let written = compress_into(&data, &options, &mut buffer)?;
    assert_eq!(&buffer[..written], &compress(&data)?[..]);

    let mut small = vec![0u8; written - 1];
    match compress_into(&data, &options, &mut small) {
        Err(ArgonautError::OutputOverflow { needed, available }) => {
            assert_eq!(needed, written);
            assert_eq!(available, written - 1);
        }
        other => panic!("expected OutputOverflow, got {:?}", other),
    }
    assert!(small.iter().all(|&b| b == 0));

    let mut restored = vec![0u8; data.len()];
    let restored_len = decompress_into(&buffer[..written], data.len(), &mut restored)?;
    assert_eq!(restored_len, data.len());
    assert_eq!(restored, data);
    Ok(())
}

/// Test that truncated streams are rejected
#[test]
fn test_truncated_stream() -> Result<(), Box<dyn std::error::Error>> {
    let data = text(20_000);
    let compressed = compress(&data)?;

    for cut in [0, 2, 3, 10, 21, compressed.len() / 2, compressed.len() - 1] {
        assert!(
            decompress(&compressed[..cut], data.len()).is_err(),
            "truncation at {} was accepted",
            cut
        );
    }
    Ok(())
}

/// Test that damaged streams never decode silently to the wrong length
#[test]
fn test_damaged_stream() -> Result<(), Box<dyn std::error::Error>> {
    let data = text(20_000);
    let compressed = compress(&data)?;

    for position in (3..compressed.len()).step_by(37) {
        let mut damaged = compressed.clone();
        damaged[position] ^= 0x5A;
        if let Ok(decompressed) = decompress(&damaged, data.len()) {
            assert_eq!(decompressed.len(), data.len());
        }
    }
    Ok(())
}

/// Test that an unknown signature code is reported as an invalid code
#[test]
fn test_unknown_signature() -> Result<(), Box<dyn std::error::Error>> {
    let data = text(400);
    let mut compressed = compress(&data)?;
    // First signature word follows the stream and block headers
    compressed[3 + 18] |= 0b11;
    assert!(matches!(
        decompress(&compressed, data.len()),
        Err(ArgonautError::InvalidCode(_))
    ));
    Ok(())
}
