use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use d1compare::{report, run_validation, tables};

/// Compare HF propagation predictions against the D1 measurement bank.
#[derive(Debug, Parser)]
#[command(name = "d1compare", version)]
struct Args {
    /// Normalized circuit table (ID, names, coordinates, distance, SSN, ...)
    #[arg(long)]
    circuits: PathBuf,

    /// Measurement table: ID, year, month, 24 hourly values (99 = no data)
    #[arg(long)]
    measurements: PathBuf,

    /// Prediction table with the same shape and row order
    #[arg(long)]
    predictions: PathBuf,

    /// Where to write the per-hour difference table
    #[arg(long)]
    diff_out: Option<PathBuf>,

    /// Where to write the statistics report (stdout when omitted)
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = run_validation(
        File::open(&args.circuits)?,
        File::open(&args.measurements)?,
        File::open(&args.predictions)?,
    )?;

    if let Some(path) = &args.diff_out {
        tables::write_diff_table(&outcome.records, File::create(path)?)?;
    }

    match &args.stats_out {
        Some(path) => report::write_report(&outcome.stats, File::create(path)?)?,
        None => report::write_report(&outcome.stats, io::stdout().lock())?,
    }

    tracing::info!(
        rows = outcome.summary.rows_compared,
        skipped = outcome.summary.rows_skipped,
        samples = outcome.summary.samples,
        "comparison finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
