//! Benchmark Logging CLI Application
//!
//! Runs a random search experiment through the bench-log-core pipeline:
//! - Builds a suite of toy objectives from a TOML configuration
//! - Aggregates every evaluation into an ECDF attainment grid
//! - Prints per-run cumulative sums and the final grid summary

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

mod config;
mod report;
mod runner;

/// Benchmark Logger - Random search with ECDF aggregation
#[derive(Parser, Debug)]
#[command(name = "bench-log-cli")]
#[command(about = "Run a random search benchmark and aggregate an ECDF", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (experiment.toml); built-in defaults if omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the random seed
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Write runs and summary to a JSON file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Benchmark Logger CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using logging library v{}", bench_log_core::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => {
            log::debug!("No configuration given, using defaults");
            config::ExperimentConfig::default()
        }
    };
    if let Some(seed) = args.seed {
        config.experiment.seed = seed;
    }

    let (runs, logger) = runner::run_experiment(&config)?;
    let summary = logger.borrow().summary();

    if !args.quiet {
        let mut stdout = io::stdout().lock();
        report::write_runs(&mut stdout, &runs)?;
        report::write_summary(&mut stdout, &summary)?;
    }
    if let Some(path) = &args.output {
        report::save_report(path, &runs, &summary)?;
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
