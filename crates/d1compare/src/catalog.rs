use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;

use geodesy::{validate_location, Location, PathDirection, D2R};

use crate::constants::LONG_PATH_MIN_ID;
use crate::error::D1Error;

/// One line of the normalized circuit table, as written by the record
/// extractor: ID, names, frequency, coordinates in "DD.MM" + hemisphere
/// letter, nominal distance, SSN, year and month of the measurement.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitRecord {
    pub id: u32,
    pub tx_name: String,
    pub rx_name: String,
    pub frequency: f64,
    pub tx_lat: String,
    pub tx_lng: String,
    pub rx_lat: String,
    pub rx_lng: String,
    pub distance: f64,
    pub ssn: i32,
    pub year: u32,
    pub month: u32,
}

/// Static geometry and metadata for one measured circuit. Immutable once
/// loaded. SSN varies by measurement month and lives in the catalog's
/// scenario index, not here.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub id: u32,
    pub tx_name: String,
    pub rx_name: String,
    pub tx: Location,
    pub rx: Location,
    /// Nominal distance (km) from the source table. Informational; the
    /// comparison recomputes the path distance from the coordinates.
    pub nominal_distance: f64,
    pub frequency: f64, // MHz
    pub direction: PathDirection,
}

impl Circuit {
    pub fn from_record(record: &CircuitRecord) -> Result<Circuit, D1Error> {
        let tx = Location {
            lat: parse_angle(record.id, &record.tx_lat, Axis::Latitude)?,
            lng: parse_angle(record.id, &record.tx_lng, Axis::Longitude)?,
        };
        let rx = Location {
            lat: parse_angle(record.id, &record.rx_lat, Axis::Latitude)?,
            lng: parse_angle(record.id, &record.rx_lng, Axis::Longitude)?,
        };
        validate_location(tx)?;
        validate_location(rx)?;

        let direction = if record.id >= LONG_PATH_MIN_ID {
            PathDirection::Long
        } else {
            PathDirection::Short
        };

        Ok(Circuit {
            id: record.id,
            tx_name: record.tx_name.clone(),
            rx_name: record.rx_name.clone(),
            tx,
            rx,
            nominal_distance: record.distance,
            frequency: record.frequency,
            direction,
        })
    }

    pub fn organization(&self) -> Option<Organization> {
        organization_for(&self.tx_name)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

/// Parses "DD.MM" plus a trailing hemisphere letter into signed radians.
/// South and West are negative. The fraction is minutes, not a decimal.
fn parse_angle(id: u32, field: &str, axis: Axis) -> Result<f64, D1Error> {
    let err = |reason: &str| D1Error::BadCoordinate {
        id,
        axis: axis.name(),
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = field.trim();
    if trimmed.len() < 2 {
        return Err(err("too short"));
    }

    let (body, hemisphere) = trimmed.split_at(trimmed.len() - 1);
    let sign = match (axis, hemisphere) {
        (Axis::Latitude, "N") | (Axis::Longitude, "E") => 1.0,
        (Axis::Latitude, "S") | (Axis::Longitude, "W") => -1.0,
        _ => return Err(err("missing or wrong hemisphere letter")),
    };

    let (degrees, minutes) = body
        .split_once('.')
        .ok_or_else(|| err("no degrees.minutes separator"))?;
    let degrees: f64 = degrees.parse().map_err(|_| err("bad degrees"))?;
    let minutes: f64 = minutes.parse().map_err(|_| err("bad minutes"))?;
    if minutes >= 60.0 {
        return Err(err("minutes must be below 60"));
    }

    Ok(sign * (degrees + minutes / 60.0) * D2R)
}

/// The source organizations the measurement bank stratifies by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Organization {
    Bbc,
    Dw,
    Chn,
    Ind,
    Jpn,
    Aus,
}

impl Organization {
    pub const ALL: [Organization; 6] = [
        Organization::Bbc,
        Organization::Dw,
        Organization::Chn,
        Organization::Ind,
        Organization::Jpn,
        Organization::Aus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Organization::Bbc => "BBC",
            Organization::Dw => "DW",
            Organization::Chn => "CHN",
            Organization::Ind => "IND",
            Organization::Jpn => "JPN",
            Organization::Aus => "AUS",
        }
    }

    pub fn index(self) -> usize {
        Organization::ALL.iter().position(|o| *o == self).unwrap()
    }
}

lazy_static! {
    // Transmitter name to contributing organization, as tabulated in the
    // measurement bank. Exact, case-sensitive names.
    static ref ORGANIZATIONS: HashMap<&'static str, Organization> = {
        use Organization::*;
        HashMap::from([
            ("ALLOUIS", Bbc),
            ("ANKARA", Bbc),
            ("ASCENSION", Bbc),
            ("BEIJING", Chn),
            ("BOMBAY", Ind),
            ("BRACKNELL", Bbc),
            ("CANBERRA", Aus),
            ("CANBERRA LP", Aus),
            ("CARNARVON", Aus),
            ("DARWIN", Aus),
            ("DAVENTRY", Bbc),
            ("DELANO", Bbc),
            ("DERBY", Aus),
            ("EKALA", Ind),
            ("FORT COLLINS", Bbc),
            ("GREENVILLE", Bbc),
            ("HYDERABAD", Ind),
            ("JERUSALEM", Bbc),
            ("KAUAI", Aus),
            ("KAVALLA", Bbc),
            ("KOGANEI", Jpn),
            ("KRANJI", Chn),
            ("KURSEONG", Ind),
            ("KUWAIT", Bbc),
            ("LUXEMBURG", Dw),
            ("MAHE", Ind),
            ("MASIRAH", Bbc),
            ("MAURITIUS", Ind),
            ("MEYERTON", Bbc),
            ("NEW YORK", Bbc),
            ("NORFOLK", Bbc),
            ("OSLO", Bbc),
            ("PLYMOUTH", Bbc),
            ("PORI", Bbc),
            ("PORO", Chn),
            ("QUITO", Aus),
            ("RANCHI", Ind),
            ("SACKVILLE", Aus),
            ("SANWA", Jpn),
            ("SANWA LP", Jpn),
            ("SHANNON", Bbc),
            ("SHEPPART LP", Bbc),
            ("SHEPPARTON", Bbc),
            ("SKELTON", Bbc),
            ("TEHERAN", Ind),
            ("TINANG", Chn),
            ("TOKYO", Jpn),
            ("WASHINGTON", Bbc),
            ("WERTACHTAL", Bbc),
            ("XIAN", Chn),
        ])
    };
}

/// Transmitter names not in the table are a defined "unclassified" state,
/// excluded from the organization stratification only.
pub fn organization_for(tx_name: &str) -> Option<Organization> {
    ORGANIZATIONS.get(tx_name).copied()
}

/// Immutable lookup from circuit ID to its geometry and metadata, plus the
/// per-month solar activity of every measurement scenario. The circuit table
/// carries one line per measurement month: the geometry on later lines for
/// an ID is redundant, but the SSN is not and is kept per (id, year, month).
#[derive(Debug, Default)]
pub struct CircuitCatalog {
    circuits: HashMap<u32, Circuit>,
    ssn: HashMap<(u32, u32, u32), i32>,
}

impl CircuitCatalog {
    pub fn new() -> CircuitCatalog {
        CircuitCatalog::default()
    }

    pub fn from_records(records: &[CircuitRecord]) -> Result<CircuitCatalog, D1Error> {
        let mut catalog = CircuitCatalog::new();
        for record in records {
            catalog.insert_record(record)?;
        }
        Ok(catalog)
    }

    pub fn insert_record(&mut self, record: &CircuitRecord) -> Result<(), D1Error> {
        if !self.circuits.contains_key(&record.id) {
            self.circuits.insert(record.id, Circuit::from_record(record)?);
        }
        self.ssn
            .entry((record.id, record.year, record.month))
            .or_insert(record.ssn);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&Circuit> {
        self.circuits.get(&id)
    }

    /// SSN of the scenario measured on this circuit in this year and month.
    pub fn ssn_for(&self, id: u32, year: u32, month: u32) -> Option<i32> {
        self.ssn.get(&(id, year, month)).copied()
    }

    /// Lookup that reports the row position of an unresolved ID, for callers
    /// skipping and logging such rows.
    pub fn resolve(&self, id: u32, position: usize) -> Result<&Circuit, D1Error> {
        self.circuits
            .get(&id)
            .ok_or(D1Error::UnknownCircuit { position, id })
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }
}
