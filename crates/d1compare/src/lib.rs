//! Validation of HF propagation predictions against the D1 measurement bank.
//!
//! Three normalized tables go in: the circuit table (geometry and metadata),
//! the measurement table and the prediction table (24 hourly dB values per
//! circuit, year and month, aligned row for row). Out come the per-hour
//! difference table and stratified statistics over frequency, distance,
//! solar activity, local time at the path midpoint, season, geomagnetic
//! latitude and source organization.

use std::io::Read;

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod comparison;
pub mod constants;
pub mod error;
pub mod report;
pub mod tables;

pub use aggregate::{Aggregator, Bin, BinKey};
pub use catalog::{Circuit, CircuitCatalog, CircuitRecord, Organization};
pub use classify::Dimension;
pub use comparison::{ComparisonRecord, HourlyRow, MidpointGeometry, RunSummary};
pub use error::D1Error;
pub use report::BinStats;

/// Everything one validation run produces.
#[derive(Debug)]
pub struct ValidationOutcome {
    /// Per-hour differences, one record per circuit, year and month.
    pub records: Vec<ComparisonRecord>,
    /// Per-bin count, mean and standard deviation in report order.
    pub stats: Vec<BinStats>,
    pub summary: RunSummary,
}

/// Runs the whole pipeline over three table sources: catalog the circuits,
/// align and difference the hourly streams, aggregate, summarize.
pub fn run_validation<C, M, P>(
    circuits: C,
    measurements: M,
    predictions: P,
) -> Result<ValidationOutcome, D1Error>
where
    C: Read,
    M: Read,
    P: Read,
{
    let catalog = tables::read_circuits(circuits)?;
    let measurement_rows = tables::read_hourly_rows(measurements)?;
    let prediction_rows = tables::read_hourly_rows(predictions)?;

    let mut aggregator = Aggregator::new();
    let (records, summary) = comparison::compare_streams(
        &catalog,
        &prediction_rows,
        &measurement_rows,
        &mut aggregator,
    )?;

    Ok(ValidationOutcome {
        records,
        stats: report::summarize(&aggregator),
        summary,
    })
}
