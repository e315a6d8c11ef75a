use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use memmap2::Mmap;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use rlekit::{codec_for, load, read_from, verify, write_to, CodecConfig, CompressedData, Error};

#[derive(Parser, Debug)]
#[command(name = "rlekit")]
#[command(about = "Run-length encode files into a compact block format")]
#[command(version)]
struct Args {
    /// Show statistics; repeat for more log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into the block format
    Compress {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Number of threads (0 = auto, 1 = single-threaded)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },

    /// Decompress a block-format file
    Decompress {
        /// Compressed input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Number of threads (0 = auto, 1 = single-threaded)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },

    /// Print the block break-down of a compressed file
    Info {
        /// Compressed input file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Check that a compressed file decodes back to the original
    Verify {
        /// Original uncompressed file
        #[arg(short, long)]
        input: PathBuf,

        /// Compressed file to check
        #[arg(short, long)]
        compressed: PathBuf,
    },
}

/// Exit codes
const EXIT_OK: u8 = 0;
const EXIT_MISMATCH: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// Input bytes, memory-mapped for files and buffered for stdin
enum InputBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for InputBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => &map[..],
            Self::Owned(buf) => &buf[..],
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be installed when embedded; keep going without ours
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn run(args: &Args) -> Result<u8, Box<dyn std::error::Error>> {
    match &args.command {
        Command::Compress { input, output, threads } => {
            run_compress(input, output, *threads, args.verbose > 0)
        }
        Command::Decompress { input, output, threads } => {
            run_decompress(input, output, *threads, args.verbose > 0)
        }
        Command::Info { input } => run_info(input),
        Command::Verify { input, compressed } => run_verify(input, compressed),
    }
}

fn read_input(path: &Path) -> io::Result<InputBytes> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(InputBytes::Owned(buf));
    }

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(InputBytes::Owned(Vec::new()));
    }
    // SAFETY: the map is read-only and this process never writes the file.
    // If another process truncates the file while it is mapped, reading the
    // lost pages raises SIGBUS and kills this process; that is not handled.
    let map = unsafe { Mmap::map(&file)? };
    Ok(InputBytes::Mapped(map))
}

fn read_compressed(path: &Path) -> rlekit::Result<CompressedData> {
    if is_stdio(path) {
        read_from(BufReader::new(io::stdin().lock()))
    } else {
        load(path)
    }
}

fn open_output(path: &Path, buffer_size: usize) -> io::Result<Box<dyn Write>> {
    if is_stdio(path) {
        Ok(Box::new(BufWriter::with_capacity(buffer_size, io::stdout().lock())))
    } else {
        Ok(Box::new(BufWriter::with_capacity(buffer_size, File::create(path)?)))
    }
}

fn run_compress(
    input: &Path,
    output: &Path,
    threads: usize,
    verbose: bool,
) -> Result<u8, Box<dyn std::error::Error>> {
    let config = CodecConfig { num_threads: threads, ..Default::default() };
    let bytes = read_input(input)?;

    let start = std::time::Instant::now();
    let data = codec_for(&config).compress(&bytes)?;
    let written = write_to(&data, open_output(output, config.buffer_size)?)?;
    let elapsed = start.elapsed();

    info!("wrote {} bytes to {}", written, output.display());

    if verbose {
        let stats = data.stats();
        eprintln!("Compression complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Output bytes:     {}", written);
        eprintln!("  Literal blocks:   {}", stats.literal_blocks);
        eprintln!("  Repeat blocks:    {}", stats.repeat_blocks);
        eprintln!("  Ratio:            {:.3}", stats.ratio());
        eprintln!("  Time:             {:.2?}", elapsed);
        eprintln!(
            "  Throughput:       {:.1} MB/s",
            stats.input_bytes as f64 / elapsed.as_secs_f64() / 1_000_000.0
        );
    }

    Ok(EXIT_OK)
}

fn run_decompress(
    input: &Path,
    output: &Path,
    threads: usize,
    verbose: bool,
) -> Result<u8, Box<dyn std::error::Error>> {
    let config = CodecConfig { num_threads: threads, ..Default::default() };
    let data = read_compressed(input)?;

    let start = std::time::Instant::now();
    let bytes = codec_for(&config).decompress(&data)?;
    let mut writer = open_output(output, config.buffer_size)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    let elapsed = start.elapsed();

    if verbose {
        eprintln!("Decompression complete:");
        eprintln!("  Blocks:           {}", data.block_count());
        eprintln!("  Output bytes:     {}", bytes.len());
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(EXIT_OK)
}

fn run_info(input: &Path) -> Result<u8, Box<dyn std::error::Error>> {
    let data = read_compressed(input)?;
    let stats = data.stats();

    println!(
        "{} blocks, {} bytes decoded, {} bytes compressed ({} on disk)",
        stats.total_blocks(),
        stats.input_bytes,
        stats.compressed_bytes,
        data.serialized_size()
    );
    for block in &data {
        println!("\t{}", block);
    }

    Ok(EXIT_OK)
}

fn run_verify(input: &Path, compressed: &Path) -> Result<u8, Box<dyn std::error::Error>> {
    let original = read_input(input)?;
    let data = read_compressed(compressed)?;

    match verify(&original, &data) {
        Ok(()) => {
            eprintln!("OK: {} bytes in {} blocks", original.len(), data.block_count());
            Ok(EXIT_OK)
        }
        Err(e @ (Error::SizeMismatch { .. } | Error::Crc32Mismatch { .. })) => {
            eprintln!("MISMATCH: {}", e);
            Ok(EXIT_MISMATCH)
        }
        Err(e) => Err(e.into()),
    }
}
