use geodesy::{
    geomagnetic_coords, great_circle_midpoint, local_time_offset, path_distance, Location, R2D,
};
use tracing::{debug, warn};

use crate::aggregate::{Aggregator, BinKey};
use crate::catalog::{Circuit, CircuitCatalog, Organization};
use crate::classify::{
    long_leaning, short_leaning, Dimension, DistanceBand, FrequencyBand, GeomagneticBand,
    LocalTimeBand, Season, SsnBand,
};
use crate::constants::{HOURS_PER_DAY, NO_MEASUREMENT};
use crate::error::D1Error;

/// One row of either hourly table: 24 values for a circuit, year and month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyRow {
    pub id: u32,
    pub year: u32,  // 2-digit year of the measurement bank
    pub month: u32, // 1..=12
    pub values: [i32; HOURS_PER_DAY],
}

/// Per-circuit geometry, computed once per row pair and reused for every
/// hour in it.
#[derive(Debug, Clone, Copy)]
pub struct MidpointGeometry {
    /// Path distance in km, recomputed from the endpoint coordinates and
    /// honoring the long-path complement.
    pub distance: f64,
    pub midpoint: Location,
    /// None when the midpoint sits on the geomagnetic pole; only the
    /// geomagnetic stratification is dropped in that case.
    pub geomagnetic: Option<Location>,
    /// Whole hours between midpoint-local time and the receiver clock.
    pub time_offset: i32,
}

pub fn resolve_geometry(circuit: &Circuit) -> MidpointGeometry {
    let distance = path_distance(circuit.tx, circuit.rx, circuit.direction);
    let midpoint = great_circle_midpoint(circuit.tx, circuit.rx, distance);
    let geomagnetic = geomagnetic_coords(midpoint);
    if geomagnetic.is_none() {
        warn!(
            id = circuit.id,
            "midpoint sits on the geomagnetic pole, geomagnetic bins skipped"
        );
    }
    let time_offset = local_time_offset(circuit.rx, midpoint, circuit.direction);

    MidpointGeometry {
        distance,
        midpoint,
        geomagnetic,
        time_offset,
    }
}

/// Classification keys shared by every hour of one row pair. Each None
/// excludes the sample from that dimension only.
#[derive(Debug, Clone, Copy)]
struct RowClass {
    frequency: Option<FrequencyBand>,
    distance: Option<DistanceBand>,
    short_leaning: bool,
    long_leaning: bool,
    ssn: Option<SsnBand>,
    season: Option<Season>,
    geomagnetic: Option<GeomagneticBand>,
    organization: Option<Organization>,
}

/// Solar activity and season belong to the measurement month, so they come
/// from the row being compared, not from the circuit's static metadata.
fn classify_row(
    circuit: &Circuit,
    geometry: &MidpointGeometry,
    month: u32,
    ssn: Option<i32>,
) -> RowClass {
    RowClass {
        frequency: FrequencyBand::classify(circuit.frequency),
        distance: DistanceBand::classify(geometry.distance),
        short_leaning: short_leaning(geometry.distance),
        long_leaning: long_leaning(geometry.distance),
        ssn: ssn.and_then(SsnBand::classify),
        season: Season::classify(month, geometry.midpoint.lat),
        geomagnetic: geometry
            .geomagnetic
            .and_then(|gm| GeomagneticBand::classify(gm.lat * R2D)),
        organization: circuit.organization(),
    }
}

fn route(aggregator: &mut Aggregator, class: &RowClass, ltime: i32, diff: f64) {
    if let Some(band) = class.frequency {
        aggregator.accumulate(BinKey::new(Dimension::Frequency, band.index()), diff);
    }
    if let Some(band) = class.distance {
        aggregator.accumulate(BinKey::new(Dimension::Distance, band.index()), diff);
    }
    if class.short_leaning {
        aggregator.accumulate(BinKey::new(Dimension::PathLeaning, 0), diff);
    }
    if class.long_leaning {
        aggregator.accumulate(BinKey::new(Dimension::PathLeaning, 1), diff);
    }
    if let Some(band) = class.ssn {
        aggregator.accumulate(BinKey::new(Dimension::Ssn, band.index()), diff);
    }
    if let Some(band) = LocalTimeBand::classify(ltime) {
        aggregator.accumulate(BinKey::new(Dimension::LocalTime, band.index()), diff);
    }
    if let Some(band) = class.season {
        aggregator.accumulate(BinKey::new(Dimension::Season, band.index()), diff);
    }
    if let Some(band) = class.geomagnetic {
        aggregator.accumulate(
            BinKey::new(Dimension::GeomagneticLatitude, band.index()),
            diff,
        );
    }
    if let Some(org) = class.organization {
        aggregator.accumulate(BinKey::new(Dimension::Organization, org.index()), diff);
    }
}

/// One row of the audit table: per-hour predicted minus measured differences.
/// Hours the measurement sentinel suppressed keep the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRecord {
    pub id: u32,
    pub year: u32,
    pub month: u32,
    pub diffs: [i32; HOURS_PER_DAY],
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_compared: usize,
    pub rows_skipped: usize,
    pub samples: u64,
}

/// Walks the two aligned streams, differencing hour by hour and routing each
/// difference into every applicable bin.
///
/// The streams must present the same circuit ID at the same ordinal position;
/// a mismatch is fatal. A circuit missing from the catalog only skips its own
/// row.
pub fn compare_streams(
    catalog: &CircuitCatalog,
    predictions: &[HourlyRow],
    measurements: &[HourlyRow],
    aggregator: &mut Aggregator,
) -> Result<(Vec<ComparisonRecord>, RunSummary), D1Error> {
    if predictions.len() != measurements.len() {
        return Err(D1Error::LengthMismatch {
            predictions: predictions.len(),
            measurements: measurements.len(),
        });
    }

    let mut records = Vec::with_capacity(measurements.len());
    let mut summary = RunSummary::default();

    for (position, (pred, meas)) in predictions.iter().zip(measurements).enumerate() {
        if pred.id != meas.id {
            return Err(D1Error::Alignment {
                position,
                prediction_id: pred.id,
                measurement_id: meas.id,
            });
        }

        let circuit = match catalog.resolve(meas.id, position) {
            Ok(circuit) => circuit,
            Err(err) => {
                warn!("{err}, row skipped");
                summary.rows_skipped += 1;
                continue;
            }
        };

        let geometry = resolve_geometry(circuit);
        debug!(
            id = circuit.id,
            distance = geometry.distance,
            offset = geometry.time_offset,
            "resolved circuit geometry"
        );

        let ssn = catalog.ssn_for(meas.id, meas.year, meas.month);
        if ssn.is_none() {
            warn!(
                id = meas.id,
                year = meas.year,
                month = meas.month,
                "no SSN record for this scenario, SSN bins skipped"
            );
        }
        let class = classify_row(circuit, &geometry, meas.month, ssn);

        let mut diffs = [NO_MEASUREMENT; HOURS_PER_DAY];
        for hour in 0..HOURS_PER_DAY {
            let measured = meas.values[hour];
            if measured == NO_MEASUREMENT {
                continue;
            }
            let diff = pred.values[hour] - measured;
            diffs[hour] = diff;

            let ltime = (hour as i32 + geometry.time_offset).rem_euclid(24);
            route(aggregator, &class, ltime, f64::from(diff));
            summary.samples += 1;
        }

        records.push(ComparisonRecord {
            id: meas.id,
            year: meas.year,
            month: meas.month,
            diffs,
        });
        summary.rows_compared += 1;
    }

    if summary.rows_compared == 0 && summary.rows_skipped > 0 {
        return Err(D1Error::EmptyRun);
    }

    Ok((records, summary))
}
