//! fscale - resize raw video frames
//!
//! Reads a single raw frame from disk, scales it with bilinear
//! interpolation and writes the packed result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fscale")]
#[command(author, version, about = "Bilinear scaler for raw video frames")]
#[command(long_about = "
Scales raw 8-bit frames in packed RGB/YUV and interleaved 4:2:2 layouts.

Examples:
  fscale formats
  fscale resize in.uyvy -f uyvy422 -s 1920x1080 -t 1280x720 -o out.uyvy
  fscale resize in.rgb -f rgb24 -s 640x480 -t 0x240 --fast -o out.rgb
  fscale -j 8 resize in.yuyv -f yuyv422 -s 3840x2160 -t 1920x1080 -o out.yuyv
  fscale resize in.bgra -f bgra32 -s 800x600 --config stage.yaml -o out.bgra
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads and row bands (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize a raw frame file
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// List pixel formats and how they are scaled
    Formats,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input raw frame
    input: PathBuf,

    /// Output raw frame (tightly packed)
    #[arg(short, long)]
    output: PathBuf,

    /// Pixel format of the input (e.g. uyvy422, rgb24)
    #[arg(short, long)]
    format: String,

    /// Input resolution, WxH
    #[arg(short, long)]
    size: String,

    /// Input row stride in bytes (default: tightly packed)
    #[arg(long)]
    stride: Option<usize>,

    /// Target resolution, WxH; one side may be 0 to keep the aspect ratio
    #[arg(short, long)]
    target: Option<String>,

    /// Use the fixed-point path
    #[arg(long)]
    fast: bool,

    /// Stage configuration file (YAML); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Resize(args) => commands::resize::run(args, cli.verbose, cli.threads),
        Commands::Formats => commands::formats::run(),
    }
}
