//! metasvg CLI - Windows metafile converter
//!
//! A command-line tool for converting WMF/EMF metafiles (and their
//! gzip-compressed WMZ/EMZ containers) to SVG.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metasvg::convert;

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Verbosity {
    /// Only log success or failure messages.
    #[default]
    Quiet,
    /// Log header information and basic progress.
    Normal,
    /// Log all decoding details including record data.
    Verbose,
}

impl Verbosity {
    /// Returns the tracing filter string for this verbosity level.
    fn as_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "metasvg=warn",
            Verbosity::Normal => "metasvg=info",
            Verbosity::Verbose => "metasvg=debug",
        }
    }
}

/// WMF/EMF to SVG converter
#[derive(Parser, Debug)]
#[command(name = "metasvg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input metafile path (.wmf, .emf, .wmz, .emz)
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG file path
    #[arg(short, long)]
    output: PathBuf,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value_t = Verbosity::default())]
    verbosity: Verbosity,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.verbosity.as_filter())),
        )
        .with_target(false)
        .with_level(true)
        .init();

    if let Err(e) = run(&args) {
        error!("Conversion failed: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Conversion successful!");
    println!(
        "Successfully converted {} to {}",
        args.input.display(),
        args.output.display()
    );

    ExitCode::SUCCESS
}

/// Main conversion logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reading input file: {}", args.input.display());
    let mut data = fs::read(&args.input)?;
    info!("Read {} bytes", data.len());

    // WMZ/EMZ containers are gzip streams around the plain metafile.
    if data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b {
        info!("Decompressing gzip container");
        let mut decoder = flate2::read::GzDecoder::new(&data[..]);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        info!("Decompressed to {} bytes", decompressed.len());
        data = decompressed;
    }

    info!("Converting to SVG...");
    let result = convert(&data, None)?;
    if result.return_value != 0 {
        return Err("could not decode metafile".into());
    }

    info!("Writing output file: {}", args.output.display());
    fs::write(&args.output, result.svg)?;

    Ok(())
}
