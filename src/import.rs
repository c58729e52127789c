//! Record reader for tab-separated postal code files
//!
//! Expects one record per line with the columns in store order:
//! country_code, postal_code, place_name, state_name, state_code,
//! county_name, county_code, community_name, community_code,
//! latitude, longitude, accuracy.
//!
//! This is the layout of the public postal code dumps. Values are taken as
//! they are: no trimming, no case folding.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::location::LocationRecord;
use crate::storage::LocationStore;
use crate::{Error, Result};

/// Number of tab-separated fields in a record line
pub const FIELD_COUNT: usize = 12;

/// How a file is loaded for a country
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Replace the country's stored rows instead of adding to them
    pub erase_first: bool,
    /// Keep every row of the file, not only rows of the country
    pub all_rows: bool,
    /// Accept a file with no matching rows. Combined with `erase_first`
    /// this empties the country.
    pub allow_empty: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            erase_first: true,
            all_rows: false,
            allow_empty: false,
        }
    }
}

/// Outcome of an import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub inserted: usize,
    /// Rows stored for the country after the import
    pub country_total: usize,
    /// The import bootstrapped the database
    pub first_use: bool,
}

/// Read the rows to import for `country_code`.
///
/// Fails with [`Error::NoRecords`] when nothing is selected, unless
/// `allow_empty` is set, so a wrong file can not silently erase a country.
pub fn load_country_records(
    path: &Path,
    country_code: &str,
    options: &ImportOptions,
) -> Result<Vec<LocationRecord>> {
    let filter = if options.all_rows { None } else { Some(country_code) };
    let records = read_records_from_path(path, filter)?;

    if records.is_empty() && !options.allow_empty {
        return Err(Error::NoRecords {
            country_code: country_code.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(records)
}

/// Store loaded rows for `country_code` and report the result
pub fn ingest_records(
    store: &mut LocationStore,
    records: &[LocationRecord],
    country_code: &str,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let first_use = store.is_first_use()?;
    let inserted = store.ingest_country_data(records, country_code, options.erase_first)?;
    let country_total = store
        .count_by_country()?
        .get(country_code)
        .copied()
        .unwrap_or(0);

    Ok(ImportSummary {
        inserted,
        country_total,
        first_use,
    })
}

/// Read all records from `path`, optionally keeping only one country
pub fn read_records_from_path(
    path: &Path,
    country_filter: Option<&str>,
) -> Result<Vec<LocationRecord>> {
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file), country_filter)?;
    tracing::debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read all records from a buffered reader. Blank lines are skipped.
pub fn read_records(
    reader: impl BufRead,
    country_filter: Option<&str>,
) -> Result<Vec<LocationRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_line(line, idx + 1)?;
        if country_filter.is_none_or(|cc| record.country_code == cc) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parse one record line. `line_no` is 1-based and only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<LocationRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(parse_error(
            line_no,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let required = |i: usize, name: &str| -> Result<String> {
        match fields[i] {
            "" => Err(parse_error(line_no, format!("missing {}", name))),
            value => Ok(value.to_string()),
        }
    };
    let optional = |i: usize| -> Option<String> {
        Some(fields[i]).filter(|v| !v.is_empty()).map(str::to_string)
    };

    Ok(LocationRecord {
        country_code: required(0, "country_code")?,
        postal_code: required(1, "postal_code")?,
        place_name: optional(2),
        state_name: optional(3),
        state_code: optional(4),
        county_name: optional(5),
        county_code: optional(6),
        community_name: optional(7),
        community_code: optional(8),
        latitude: parse_number(fields[9], "latitude", line_no)?,
        longitude: parse_number(fields[10], "longitude", line_no)?,
        accuracy: parse_number(fields[11], "accuracy", line_no)?,
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str, line_no: usize) -> Result<T> {
    value
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid {}: {:?}", name, value)))
}

fn parse_error(line: usize, message: String) -> Error {
    Error::Parse { line, message }
}
