//! argonaut-cli - Command-line interface for Argonaut
//!
//! A command-line tool for compressing and decompressing files with the
//! Argonaut codec. Files are stored as the original length (u64 LE) followed
//! by the Argonaut stream, since the stream itself does not record it.

use argonaut::{
    decompress, CompressionStats, Encoder, Options, Word, WordSize, DEFAULT_BUCKET_DEPTH,
    DEFAULT_HASH_BITS, STREAM_HEADER_SIZE,
};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Size of the original-length prefix
const LENGTH_PREFIX_SIZE: usize = 8;

/// Inputs above this size get a progress bar
const PROGRESS_THRESHOLD: usize = 1024 * 1024;

/// Bytes encoded between progress updates
const PROGRESS_CHUNK: usize = 64 * 1024;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "argonaut-cli")]
#[command(about = "A CLI tool for Argonaut compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Word width
        #[arg(short, long, value_enum, default_value_t = CliWordSize::Word32)]
        word_size: CliWordSize,

        /// log2 of the number of dictionary buckets (8-16)
        #[arg(long, default_value_t = DEFAULT_HASH_BITS)]
        hash_bits: u8,

        /// Words kept per dictionary bucket (1-256)
        #[arg(short, long, default_value_t = DEFAULT_BUCKET_DEPTH)]
        bucket_depth: u16,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress an Argonaut-compressed file
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliWordSize {
    /// 4-byte words - Default
    Word32,
    /// 8-byte words
    Word64,
}

impl From<CliWordSize> for WordSize {
    fn from(size: CliWordSize) -> Self {
        match size {
            CliWordSize::Word32 => WordSize::Word32,
            CliWordSize::Word64 => WordSize::Word64,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            word_size,
            hash_bits,
            bucket_depth,
            force,
        } => build_options(word_size, hash_bits, bucket_depth).and_then(|options| {
            compress_file(&input, &output, &options, force, cli.verbose, cli.quiet)
        }),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_options(
    word_size: CliWordSize,
    hash_bits: u8,
    bucket_depth: u16,
) -> CliResult<Options> {
    Ok(Options::new(word_size.into())
        .with_hash_bits(hash_bits)?
        .with_bucket_depth(bucket_depth)?)
}

fn check_paths(input: &Path, output: &Path, force: bool) -> CliResult<()> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn progress_bar(len: u64, message: &'static str) -> CliResult<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
            )?
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    Ok(pb)
}

/// Encode `data` word by word, reporting progress every chunk
fn encode_container<W: Word>(
    data: &[u8],
    options: &Options,
    progress: Option<&ProgressBar>,
) -> CliResult<(Vec<u8>, CompressionStats)> {
    let bound = argonaut::compress_bound(data.len(), options);
    let mut output = Vec::with_capacity(LENGTH_PREFIX_SIZE + bound);
    output.extend_from_slice(&(data.len() as u64).to_le_bytes());
    output.extend_from_slice(&options.to_header()?);

    let mut encoder = Encoder::<W>::new(options)?;
    let aligned = data.len() - data.len() % W::BYTES;
    for chunk in data[..aligned].chunks(PROGRESS_CHUNK) {
        for word in chunk.chunks_exact(W::BYTES) {
            encoder.encode_word(W::read_le(word), &mut output);
        }
        if let Some(pb) = progress {
            pb.inc(chunk.len() as u64);
        }
    }

    let mut stats = encoder.finish(&data[aligned..], &mut output);
    stats.output_bytes -= LENGTH_PREFIX_SIZE as u64;
    Ok((output, stats))
}

fn compress_file(
    input: &Path,
    output: &Path,
    options: &Options,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> CliResult<()> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!(
            "Word size: {:?}, Hash bits: {}, Bucket depth: {}",
            options.word_size, options.hash_bits, options.bucket_depth
        );
    }

    let start_time = Instant::now();

    // Read input file
    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    // Show progress bar for large files
    let progress = if !quiet && input_size > PROGRESS_THRESHOLD {
        Some(progress_bar(input_size as u64, "Compressing...")?)
    } else {
        None
    };

    let (container, stats) = match options.word_size {
        WordSize::Word32 => encode_container::<u32>(&input_data, options, progress.as_ref()),
        WordSize::Word64 => encode_container::<u64>(&input_data, options, progress.as_ref()),
    }
    .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.finish_with_message("Compression complete");
    }

    // Write output file
    fs::write(output, &container)?;

    let compression_time = start_time.elapsed();
    let output_size = container.len();
    let compression_ratio = (output_size as f64 / input_size.max(1) as f64) * 100.0;

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", compression_time);

        if verbose {
            println!(
                "  Words:  {} ({} predicted, {} literal, {} escaped)",
                stats.words, stats.hits, stats.misses, stats.escaped
            );
            println!("  Blocks: {} ({} escapes)", stats.blocks, stats.escapes);
        }
        if compression_ratio > 100.0 {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

/// Split a container into the original length and the Argonaut stream
fn split_container(data: &[u8]) -> CliResult<(usize, &[u8])> {
    if data.len() < LENGTH_PREFIX_SIZE + STREAM_HEADER_SIZE {
        return Err("File too small to be a valid Argonaut compressed file".into());
    }
    let (prefix, stream) = data.split_at(LENGTH_PREFIX_SIZE);
    let mut length = [0u8; LENGTH_PREFIX_SIZE];
    length.copy_from_slice(prefix);
    let length = usize::try_from(u64::from_le_bytes(length))?;
    Ok((length, stream))
}

fn decompress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> CliResult<()> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    // Read input file
    let container = fs::read(input)?;
    let input_size = container.len();
    let (original_size, stream) = split_container(&container)?;

    if verbose {
        println!("Compressed size: {} bytes", input_size);
        println!("Original size:   {} bytes", original_size);
    }

    // Show progress bar for large files
    let progress = if !quiet && original_size > PROGRESS_THRESHOLD {
        Some(progress_bar(original_size as u64, "Decompressing...")?)
    } else {
        None
    };

    // Decompress data
    let decompressed_data = decompress(stream, original_size)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.set_position(original_size as u64);
        pb.finish_with_message("Decompression complete");
    }

    // Write output file
    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();
    let output_size = decompressed_data.len();
    let compression_ratio = (input_size as f64 / output_size.max(1) as f64) * 100.0;

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> CliResult<()> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    // Read the file
    let data = fs::read(input)?;
    let file_size = data.len();
    let (original_size, stream) = split_container(&data)?;

    println!("Argonaut File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);
    println!("  Original Size: {} bytes", original_size);

    match Options::from_header(stream) {
        Ok(options) => {
            println!(
                "  Word Size: {} bytes ({:?})",
                options.word_size.bytes(),
                options.word_size
            );
            println!(
                "  Dictionary: {} buckets x {} words ({} hash bits)",
                options.bucket_count(),
                options.bucket_depth,
                options.hash_bits
            );
        }
        Err(e) => println!("  Header: invalid ({})", e),
    }

    if verbose {
        println!(
            "  Header bytes: {:02x} {:02x} {:02x}",
            stream[0], stream[1], stream[2]
        );
    }

    // Validate by decoding the whole stream
    match decompress(stream, original_size) {
        Ok(_) => {
            let compression_ratio = (file_size as f64 / original_size.max(1) as f64) * 100.0;
            println!("  Compression Ratio: {:.1}%", compression_ratio);
            println!("  Status: ✓ Valid Argonaut file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted Argonaut file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
