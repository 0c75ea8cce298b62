//! Readers and writers for the normalized delimited tables. All of them take
//! abstract readers/writers so callers can feed files, memory or pipes.

use std::io::{self, Read, Write};

use crate::catalog::{CircuitCatalog, CircuitRecord};
use crate::comparison::{ComparisonRecord, HourlyRow};
use crate::constants::HOURS_PER_DAY;
use crate::error::D1Error;

/// Reads the normalized circuit table (header line, then one record per
/// measurement scenario) into a catalog keyed by circuit ID.
///
/// Fields are positional, so the reader runs headerless and drops the legacy
/// header line instead of matching on its column names.
pub fn read_circuits<R: Read>(reader: R) -> Result<CircuitCatalog, D1Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut catalog = CircuitCatalog::new();
    for (index, result) in rdr.deserialize::<CircuitRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(_) if index == 0 => continue, // header line
            Err(err) => return Err(err.into()),
        };
        catalog.insert_record(&record)?;
    }
    Ok(catalog)
}

/// Reads an hourly table: circuit ID, 2-digit year, month, then 24 values.
/// A leading legacy header line (" ID, Y, M,01,...") is tolerated and
/// skipped; any later unparsable line is an error with its line number.
pub fn read_hourly_rows<R: Read>(reader: R) -> Result<Vec<HourlyRow>, D1Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let line = index + 1;
        let record = result?;

        if record.len() != 3 + HOURS_PER_DAY {
            return Err(D1Error::Table {
                line,
                message: format!("expected {} fields, found {}", 3 + HOURS_PER_DAY, record.len()),
            });
        }

        let id = match record[0].parse::<u32>() {
            Ok(id) => id,
            // Only the first line may fail to parse; it is the header.
            Err(_) if index == 0 => continue,
            Err(_) => {
                return Err(D1Error::Table {
                    line,
                    message: format!("bad circuit ID {:?}", &record[0]),
                })
            }
        };

        let field = |pos: usize, name: &str| -> Result<i32, D1Error> {
            record[pos].parse::<i32>().map_err(|_| D1Error::Table {
                line,
                message: format!("bad {name} {:?}", &record[pos]),
            })
        };

        let year = field(1, "year")? as u32;
        let month = field(2, "month")? as u32;

        let mut values = [0i32; HOURS_PER_DAY];
        for (hour, value) in values.iter_mut().enumerate() {
            *value = field(3 + hour, "hourly value")?;
        }

        rows.push(HourlyRow {
            id,
            year,
            month,
            values,
        });
    }
    Ok(rows)
}

/// Writes the audit table of per-hour differences with the legacy header,
/// one row per circuit, year and month.
pub fn write_diff_table<W: Write>(records: &[ComparisonRecord], mut out: W) -> io::Result<()> {
    write!(out, " ID, Y, M")?;
    for hour in 1..=HOURS_PER_DAY {
        write!(out, ",{:02}", hour)?;
    }
    writeln!(out)?;

    for record in records {
        write!(out, "{:3},{:02},{:02}", record.id, record.year, record.month)?;
        for diff in &record.diffs {
            write!(out, ",{}", diff)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
