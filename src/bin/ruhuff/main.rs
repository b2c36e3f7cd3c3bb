//! Command line front end: `ruhuff compress` and `ruhuff decompress`.

mod progress;

use std::fs::{File, Metadata};
use std::io::{self, BufWriter, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use console::{style, Term};
use progress::ProgressMonitor;
use ruhuff::decoding::{decode_to_drain, StreamingDecoder};
use ruhuff::encoding::{HuffmanCompressor, DEFAULT_PERMISSIONS};
use ruhuff::CodecStats;
use tracing::{debug, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(version, about = "Compress and decompress files with a static Huffman code")]
struct Cli {
    /// Print size statistics. Repeat for more log output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// File to compress, stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to write the compressed artifact, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write compressed data even if stdout is a terminal
        #[arg(short, long)]
        force: bool,
    },
    /// Decompress an artifact written by `compress`
    Decompress {
        /// Artifact to decompress, stdin if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to write the restored file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stats = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
        } => compress(input.as_deref(), output.as_deref(), force)?,
        Commands::Decompress { input, output } => {
            decompress(input.as_deref(), output.as_deref())?
        }
    };

    if cli.verbose > 0 {
        eprintln!("{}", style(stats).bold());
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // log lines go through indicatif so they do not tear the progress bars
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(level)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn compress(input: Option<&Path>, output: Option<&Path>, force: bool) -> Result<CodecStats> {
    if output.is_none() && !force && Term::stdout().is_term() {
        bail!("refusing to write compressed data to a terminal, pass --output or --force");
    }

    match input {
        Some(path) => compress_file(path, output),
        None => compress_stream(io::stdin().lock(), output),
    }
}

/// Compress a file, the output inherits its mode bits
fn compress_file(path: &Path, output: Option<&Path>) -> Result<CodecStats> {
    let file = File::open(path)
        .wrap_err_with(|| format!("failed to open input file {}", path.display()))?;
    let metadata = file
        .metadata()
        .wrap_err_with(|| format!("failed to stat {}", path.display()))?;
    // counting and encoding both read the whole file
    let source = ProgressMonitor::new(file, 2 * metadata.len(), "Compressing");
    compress_from(source, mode_bits(&metadata), output)
}

/// Compress a stream that can't be rewound by buffering it in memory first
fn compress_stream<R: Read>(mut stream: R, output: Option<&Path>) -> Result<CodecStats> {
    let mut buffer = Vec::new();
    stream
        .read_to_end(&mut buffer)
        .wrap_err("failed to read stdin")?;
    debug!(bytes = buffer.len(), "Buffered stdin");
    compress_from(Cursor::new(buffer), DEFAULT_PERMISSIONS, output)
}

fn compress_from<R: Read + Seek>(
    source: R,
    permissions: u16,
    output: Option<&Path>,
) -> Result<CodecStats> {
    let mut compressor = HuffmanCompressor::new();
    compressor.set_source(source);
    compressor.set_drain(open_drain(output)?);
    compressor.set_permissions(permissions);
    let stats = compressor.compress().wrap_err("compression failed")?;
    // close the output before touching its mode
    drop(compressor);

    if let Some(path) = output {
        apply_permissions(path, permissions)?;
    }
    info!(
        uncompressed = stats.uncompressed_size,
        compressed = stats.compressed_size,
        "Compressed"
    );
    Ok(stats)
}

fn decompress(input: Option<&Path>, output: Option<&Path>) -> Result<CodecStats> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("failed to open input file {}", path.display()))?;
            let len = file
                .metadata()
                .wrap_err_with(|| format!("failed to stat {}", path.display()))?
                .len();
            decompress_from(ProgressMonitor::new(file, len, "Decompressing"), output)
        }
        None => decompress_from(io::stdin().lock(), output),
    }
}

fn decompress_from<R: Read>(source: R, output: Option<&Path>) -> Result<CodecStats> {
    // header and tree are validated before the output is created or truncated
    let decoder = StreamingDecoder::new(source).wrap_err("not a valid compressed artifact")?;
    let (header, stats) =
        decode_to_drain(decoder, open_drain(output)?).wrap_err("decompression failed")?;
    if let Some(path) = output {
        apply_permissions(path, header.permissions)?;
    }
    info!(
        uncompressed = stats.uncompressed_size,
        compressed = stats.compressed_size,
        "Decompressed, restored mode {:o}",
        header.permissions
    );
    Ok(stats)
}

fn open_drain(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u16 {
    use std::os::unix::fs::PermissionsExt;
    (metadata.permissions().mode() & 0o7777) as u16
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u16 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        DEFAULT_PERMISSIONS
    }
}

#[cfg(unix)]
fn apply_permissions(path: &Path, mode: u16) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(u32::from(mode & 0o7777));
    std::fs::set_permissions(path, permissions)
        .wrap_err_with(|| format!("failed to set permissions of {}", path.display()))
}

#[cfg(not(unix))]
fn apply_permissions(path: &Path, mode: u16) -> Result<()> {
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    std::fs::set_permissions(path, permissions)
        .wrap_err_with(|| format!("failed to set permissions of {}", path.display()))
}
