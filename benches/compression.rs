use argonaut::{compress_with, Options, WordSize};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            // Generate Lorem ipsum style text data
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            base.iter().cycle().take(size).copied().collect()
        }
        "table" => {
            // Fixed-width records of small counters, typical of binary tables
            (0..size / 4)
                .flat_map(|i| ((i % 64) as u32 * 1000).to_le_bytes())
                .collect()
        }
        "repetitive" => {
            // Highly repetitive data that compresses well
            b"ABCDEFGH".iter().cycle().take(size).copied().collect()
        }
        "random" => {
            // Pseudo-random data that escapes every block
            let mut state = 0x2545_F491_4F6C_DD1Du64;
            (0..size)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    state as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn word_size_label(word_size: WordSize) -> &'static str {
    match word_size {
        WordSize::Word32 => "w32",
        WordSize::Word64 => "w64",
    }
}

fn compression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    // Test different input sizes
    for size in [1024, 10240, 102400, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        // Test different data patterns
        for pattern in ["text", "table", "repetitive", "random"].iter() {
            let data = generate_test_data(*size, pattern);

            for word_size in [WordSize::Word32, WordSize::Word64] {
                let options = Options::new(word_size);
                let benchmark_id = BenchmarkId::from_parameter(format!(
                    "{}/{}/{}",
                    size_label,
                    pattern,
                    word_size_label(word_size)
                ));

                group.throughput(Throughput::Bytes(*size as u64));
                group.bench_with_input(benchmark_id, &data, |b, data| {
                    b.iter(|| {
                        compress_with(black_box(data), black_box(&options))
                            .expect("Compression failed")
                    });
                });
            }
        }
    }

    group.finish();
}

fn dictionary_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_geometry");
    group.measurement_time(Duration::from_secs(5));

    let data = generate_test_data(102400, "text");
    for hash_bits in [8u8, 12, 16] {
        for bucket_depth in [4u16, 64, 256] {
            let options = Options::new(WordSize::Word32)
                .with_hash_bits(hash_bits)
                .and_then(|options| options.with_bucket_depth(bucket_depth))
                .expect("Invalid options");

            let benchmark_id =
                BenchmarkId::from_parameter(format!("bits{}/depth{}", hash_bits, bucket_depth));

            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(benchmark_id, &data, |b, data| {
                b.iter_batched(
                    || data.clone(),
                    |data| {
                        let compressed = compress_with(black_box(&data), black_box(&options))
                            .expect("Compression failed");

                        // Return compression ratio
                        let ratio = compressed.len() as f64 / data.len() as f64;
                        black_box(ratio)
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn large_file_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_file_compression");
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(10);

    // 10MB of text
    let size = 10485760;
    let data = generate_test_data(size, "text");
    let options = Options::default();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::from_parameter("10MB"), &data, |b, data| {
        b.iter(|| compress_with(black_box(data), black_box(&options)).expect("Compression failed"));
    });

    group.finish();
}

criterion_group!(
    benches,
    compression_throughput,
    dictionary_geometry,
    large_file_compression
);
criterion_main!(benches);
