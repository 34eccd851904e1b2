use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::model::{Dataset, Pollutant, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. `MissingColumn` is the schema error
/// the UI must surface instead of rendering charts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read source file")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch remote CSV")]
    Http(#[from] reqwest::Error),

    #[error("source is not parsable as CSV")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' is missing from the CSV header")]
    MissingColumn(&'static str),

    #[error("no usable rows in source (all rows had unparsable datetime or TEMP)")]
    NoRows,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a local path or an `http(s)://` URL.
/// The source is read exactly once; there are no retries.
pub fn load(source: &str) -> Result<Dataset, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        log::info!("Fetching remote CSV from {source}");
        let body = reqwest::blocking::get(source)?.error_for_status()?.text()?;
        load_from_reader(body.as_bytes())
    } else {
        load_path(Path::new(source))
    }
}

/// Load a dataset from a local file.
pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// Parse CSV rows from any reader into a [`Dataset`].
///
/// Required columns: `datetime`, `TEMP`. Pollutant columns are optional as a
/// whole; within a present column, empty / `NA` / non-numeric cells become
/// missing values. Rows whose `datetime` or `TEMP` cannot be parsed are
/// skipped with a warning rather than failing the load.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let datetime_idx = headers
        .iter()
        .position(|h| h == "datetime")
        .ok_or(LoadError::MissingColumn("datetime"))?;
    let temp_idx = headers
        .iter()
        .position(|h| h == "TEMP")
        .ok_or(LoadError::MissingColumn("TEMP"))?;

    let pollutant_idx: Vec<(Pollutant, Option<usize>)> = Pollutant::ALL
        .into_iter()
        .map(|p| (p, headers.iter().position(|h| h == p.column())))
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in rdr.records().enumerate() {
        let row = result?;

        let raw_datetime = row.get(datetime_idx).unwrap_or("");
        let Some(datetime) = parse_datetime(raw_datetime) else {
            log::warn!("Row {row_no}: unparsable datetime '{raw_datetime}', skipping");
            skipped += 1;
            continue;
        };

        let Some(temp) = parse_cell(row.get(temp_idx).unwrap_or("")) else {
            log::warn!("Row {row_no}: missing or unparsable TEMP, skipping");
            skipped += 1;
            continue;
        };

        let mut values = [None; 5];
        for (slot, (_, idx)) in values.iter_mut().zip(&pollutant_idx) {
            *slot = idx.and_then(|i| parse_cell(row.get(i).unwrap_or("")));
        }
        let [no2, so2, pm10, pm25, o3] = values;

        records.push(Record::new(datetime, temp, no2, so2, pm10, pm25, o3));
    }

    if records.is_empty() {
        return Err(LoadError::NoRows);
    }
    if skipped > 0 {
        log::warn!("Skipped {skipped} unusable rows during load");
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Timestamp formats seen in the aggregated air-quality exports.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M"];

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    // Date-only cells get midnight.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a numeric cell, treating empty / NA / NaN markers as missing.
fn parse_cell(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("null") {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
