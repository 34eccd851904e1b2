use std::collections::HashMap;

use serde::Serialize;

use super::model::Dataset;

/// Fixed download name for the filtered slice.
pub const EXPORT_FILENAME: &str = "data_filtered.csv";

// ---------------------------------------------------------------------------
// CSV export of a filtered subset
// ---------------------------------------------------------------------------

/// One exported row. Derived columns are included so the download matches
/// what the table shows; `Season` round-trips through re-classification of
/// `TEMP`.
#[derive(Serialize)]
struct ExportRow<'a> {
    datetime: String,
    #[serde(rename = "TEMP")]
    temp: f64,
    #[serde(rename = "NO2")]
    no2: Option<f64>,
    #[serde(rename = "SO2")]
    so2: Option<f64>,
    #[serde(rename = "PM10")]
    pm10: Option<f64>,
    #[serde(rename = "PM2.5")]
    pm25: Option<f64>,
    #[serde(rename = "O3")]
    o3: Option<f64>,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Season")]
    season: &'a str,
}

/// Column order of the export, also used by [`to_csv`] for the header row.
const EXPORT_HEADER: [&str; 10] = [
    "datetime", "TEMP", "NO2", "SO2", "PM10", "PM2.5", "O3", "Year", "Month", "Season",
];

/// Encode the given subset of records as CSV text. An empty subset still
/// gets the header row, so a downloaded file is never zero bytes.
pub fn to_csv(dataset: &Dataset, indices: &[usize]) -> String {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    let _ = wtr.write_record(EXPORT_HEADER);
    for &i in indices {
        let r = &dataset.records[i];
        // Writing into a Vec<u8> cannot fail.
        let _ = wtr.serialize(ExportRow {
            datetime: r.datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            temp: r.temp,
            no2: r.no2,
            so2: r.so2,
            pm10: r.pm10,
            pm25: r.pm25,
            o3: r.o3,
            year: r.year,
            month: r.month,
            season: r.season.label(),
        });
    }
    let bytes = wtr.into_inner().unwrap_or_default();
    String::from_utf8(bytes).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Session cache
// ---------------------------------------------------------------------------

/// Memoizes the encoded CSV per subset. The base dataset is immutable for
/// the session, so the subset's index vector identifies its content exactly.
/// Unbounded, lives as long as the app.
#[derive(Default)]
pub struct ExportCache {
    encoded: HashMap<Vec<usize>, String>,
}

impl ExportCache {
    /// Return the CSV for this subset, encoding it on first request.
    pub fn get_or_encode(&mut self, dataset: &Dataset, indices: &[usize]) -> &str {
        self.encoded
            .entry(indices.to_vec())
            .or_insert_with(|| to_csv(dataset, indices))
    }

    /// Drop all cached exports (called when a new dataset replaces the old).
    pub fn clear(&mut self) {
        self.encoded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;
    use crate::data::model::Season;

    const SAMPLE: &str = "\
datetime,TEMP,NO2,SO2,PM10,PM2.5,O3
2016-01-01 00:00:00,-5.0,12.0,3.0,40.0,25.0,60.0
2016-04-01 00:00:00,15.0,,4.0,,30.0,55.0
2016-07-01 00:00:00,25.0,20.0,5.0,50.0,35.0,70.0
";

    #[test]
    fn export_includes_derived_columns() {
        let ds = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let csv = to_csv(&ds, &[0, 1, 2]);
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "datetime,TEMP,NO2,SO2,PM10,PM2.5,O3,Year,Month,Season"
        );
        assert!(csv.contains("Gelombang Dingin"));
        assert!(csv.contains("Musim Semi"));
    }

    #[test]
    fn export_round_trips_through_the_loader() {
        let ds = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let indices = vec![0, 2];
        let csv = to_csv(&ds, &indices);

        let reparsed = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), indices.len());
        for (j, &i) in indices.iter().enumerate() {
            let orig = &ds.records[i];
            let round = &reparsed.records[j];
            // Season is re-derived from TEMP and must agree.
            assert_eq!(round.season, orig.season);
            assert_eq!(round.datetime, orig.datetime);
            assert_eq!(round.no2, orig.no2);
        }
    }

    #[test]
    fn missing_values_export_as_empty_cells() {
        let ds = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let csv = to_csv(&ds, &[1]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2016-04-01 00:00:00,15.0,,4.0,,30.0,55.0,2016,4,Musim Semi");
    }

    #[test]
    fn empty_subset_exports_header_only() {
        let ds = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let csv = to_csv(&ds, &[]);
        assert_eq!(
            csv.trim_end(),
            "datetime,TEMP,NO2,SO2,PM10,PM2.5,O3,Year,Month,Season"
        );
    }

    #[test]
    fn cache_returns_identical_text_for_identical_subsets() {
        let ds = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let mut cache = ExportCache::default();
        let first = cache.get_or_encode(&ds, &[0, 1]).to_string();
        let second = cache.get_or_encode(&ds, &[0, 1]).to_string();
        assert_eq!(first, second);
        assert_eq!(cache.encoded.len(), 1);

        cache.get_or_encode(&ds, &[2]);
        assert_eq!(cache.encoded.len(), 2);
        cache.clear();
        assert!(cache.encoded.is_empty());
    }

    #[test]
    fn winter_rows_classify_identically_after_round_trip() {
        let ds = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let winter: Vec<usize> = (0..ds.len())
            .filter(|&i| ds.records[i].season == Season::ColdWave)
            .collect();
        let reparsed = load_from_reader(to_csv(&ds, &winter).as_bytes()).unwrap();
        assert!(reparsed.records.iter().all(|r| r.season == Season::ColdWave));
    }
}
