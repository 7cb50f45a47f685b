//! linecrate-cli: Command-line interface for polyline decimation.
//!
//! Reads and writes polyline sets as JSON documents.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=linecrate_simplification=info` - Per-run summaries
//! - `RUST_LOG=linecrate_simplification=debug` - Per-polyline progress
//! - `RUST_LOG=trace` - Every vertex removal
//!
//! # Example
//!
//! ```bash
//! linecrate decimate contours.json -o contours_small.json --reduction 0.8 --max-error 0.5
//! linecrate info contours_small.json --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{decimate, info};

/// linecrate - decimate polylines while bounding the error of each removal.
#[derive(Parser)]
#[command(name = "linecrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PrecisionArg {
    /// Same precision as the input points
    Default,
    /// 32-bit floats
    Single,
    /// 64-bit floats
    Double,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Perpendicular distance to the neighbor chord
    Distance,
    /// Turning angle at the vertex, in radians
    Angle,
}

#[derive(Subcommand)]
enum Commands {
    /// Display polyline set statistics
    Info {
        /// Input polyline set (JSON)
        input: PathBuf,
    },

    /// Decimate every polyline in a set
    Decimate {
        /// Input polyline set (JSON)
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Filter configuration (JSON); flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fraction (0.0-1.0) of each polyline's vertices to try to remove
        #[arg(long)]
        reduction: Option<f64>,

        /// Largest error allowed for a single removal
        #[arg(long)]
        max_error: Option<f64>,

        /// Precision of the written points
        #[arg(long)]
        precision: Option<PrecisionArg>,

        /// Error metric
        #[arg(long)]
        strategy: Option<StrategyArg>,

        /// Decimate polylines in parallel
        #[arg(long)]
        parallel: bool,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "linecrate_simplification=info",
            2 => "linecrate_simplification=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Info { input } => info::run(input, &cli),
        Commands::Decimate {
            input,
            output,
            config,
            reduction,
            max_error,
            precision,
            strategy,
            parallel,
        } => decimate::run(
            input,
            output,
            &decimate::Options {
                config: config.as_deref(),
                reduction: *reduction,
                max_error: *max_error,
                precision: *precision,
                strategy: *strategy,
                parallel: *parallel,
            },
            &cli,
        ),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
