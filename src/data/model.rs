use std::fmt;

use chrono::{Datelike, NaiveDateTime};

// ---------------------------------------------------------------------------
// Season – categorical label derived from temperature
// ---------------------------------------------------------------------------

/// One of six fixed temperature buckets. Labels follow the source dataset's
/// Indonesian naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    ColdWave,
    Winter,
    Spring,
    Summer,
    IntenseSummer,
    HeatWave,
}

impl Season {
    /// All six seasons, coldest first.
    pub const ALL: [Season; 6] = [
        Season::ColdWave,
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::IntenseSummer,
        Season::HeatWave,
    ];

    /// Classify a temperature reading into its season bucket.
    ///
    /// Half-open intervals, lower bound inclusive: `[0, 10)` is winter,
    /// `classify(10.0)` is already spring. Total over all finite inputs.
    pub fn classify(temp: f64) -> Season {
        if temp < 0.0 {
            Season::ColdWave
        } else if temp < 10.0 {
            Season::Winter
        } else if temp < 20.0 {
            Season::Spring
        } else if temp < 30.0 {
            Season::Summer
        } else if temp < 35.0 {
            Season::IntenseSummer
        } else {
            Season::HeatWave
        }
    }

    /// The dataset's label for this season.
    pub fn label(self) -> &'static str {
        match self {
            Season::ColdWave => "Gelombang Dingin",
            Season::Winter => "Musim Dingin",
            Season::Spring => "Musim Semi",
            Season::Summer => "Musim Panas",
            Season::IntenseSummer => "Musim Panas Intens",
            Season::HeatWave => "Gelombang Panas",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Pollutant – the measured concentration columns
// ---------------------------------------------------------------------------

/// The pollutant concentration columns of the source CSV, each of which may
/// be missing independently per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    No2,
    So2,
    Pm10,
    Pm25,
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::O3,
    ];

    /// CSV column header for this pollutant.
    pub fn column(self) -> &'static str {
        match self {
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
            Pollutant::O3 => "O3",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single observation. `year`, `month` and `season` are derived once at
/// load time and never recomputed.
#[derive(Debug, Clone)]
pub struct Record {
    pub datetime: NaiveDateTime,
    pub temp: f64,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub pm10: Option<f64>,
    pub pm25: Option<f64>,
    pub o3: Option<f64>,
    pub year: i32,
    pub month: u32,
    pub season: Season,
}

impl Record {
    /// Build a record from its raw columns, deriving year, month and season.
    pub fn new(
        datetime: NaiveDateTime,
        temp: f64,
        no2: Option<f64>,
        so2: Option<f64>,
        pm10: Option<f64>,
        pm25: Option<f64>,
        o3: Option<f64>,
    ) -> Self {
        Record {
            datetime,
            temp,
            no2,
            so2,
            pm10,
            pm25,
            o3,
            year: datetime.year(),
            month: datetime.month(),
            season: Season::classify(temp),
        }
    }

    /// Concentration value for a pollutant column, `None` when missing.
    pub fn pollutant(&self, p: Pollutant) -> Option<f64> {
        match p {
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
            Pollutant::O3 => self.o3,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset, immutable after load, with pre-computed unique
/// values for the sidebar selectors.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records in source-file order.
    pub records: Vec<Record>,
    /// Seasons present, coldest first.
    pub seasons: Vec<Season>,
    /// Years present, ascending.
    pub years: Vec<i32>,
    /// Months present, ascending.
    pub months: Vec<u32>,
}

impl Dataset {
    /// Build selector indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let seasons: Vec<Season> = Season::ALL
            .into_iter()
            .filter(|s| records.iter().any(|r| r.season == *s))
            .collect();

        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let mut months: Vec<u32> = records.iter().map(|r| r.month).collect();
        months.sort_unstable();
        months.dedup();

        Dataset {
            records,
            seasons,
            years,
            months,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn classify_cold_wave_below_zero() {
        assert_eq!(Season::classify(-0.1), Season::ColdWave);
        assert_eq!(Season::classify(-40.0), Season::ColdWave);
    }

    #[test]
    fn classify_lower_bounds_are_inclusive() {
        assert_eq!(Season::classify(0.0), Season::Winter);
        assert_eq!(Season::classify(10.0), Season::Spring);
        assert_eq!(Season::classify(20.0), Season::Summer);
        assert_eq!(Season::classify(30.0), Season::IntenseSummer);
        assert_eq!(Season::classify(35.0), Season::HeatWave);
    }

    #[test]
    fn classify_upper_bounds_are_exclusive() {
        assert_eq!(Season::classify(9.999), Season::Winter);
        assert_eq!(Season::classify(19.999), Season::Spring);
        assert_eq!(Season::classify(29.999), Season::Summer);
        assert_eq!(Season::classify(34.999), Season::IntenseSummer);
    }

    #[test]
    fn classify_is_total_over_a_wide_sweep() {
        // Every tenth of a degree from -50.0 to 50.0 lands in exactly one
        // bucket, never regressing in the bucket order.
        let mut prev = Season::ColdWave;
        for i in -500..=500 {
            let s = Season::classify(i as f64 / 10.0);
            assert!(s >= prev, "bucket order regressed at {}", i as f64 / 10.0);
            prev = s;
        }
        assert_eq!(prev, Season::HeatWave);
    }

    #[test]
    fn six_sample_temps_hit_all_six_buckets() {
        let temps = [-5.0, 5.0, 15.0, 25.0, 32.0, 40.0];
        let labels: Vec<&str> = temps.iter().map(|&t| Season::classify(t).label()).collect();
        assert_eq!(
            labels,
            vec![
                "Gelombang Dingin",
                "Musim Dingin",
                "Musim Semi",
                "Musim Panas",
                "Musim Panas Intens",
                "Gelombang Panas",
            ]
        );
        let mut dedup = labels.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 6, "no label may repeat");
    }

    #[test]
    fn record_derives_year_month_season() {
        let dt = NaiveDate::from_ymd_opt(2017, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let r = Record::new(dt, 22.5, Some(31.0), None, None, None, None);
        assert_eq!(r.year, 2017);
        assert_eq!(r.month, 3);
        assert_eq!(r.season, Season::Summer);
        assert_eq!(r.pollutant(Pollutant::No2), Some(31.0));
        assert_eq!(r.pollutant(Pollutant::So2), None);
    }

    #[test]
    fn dataset_indexes_unique_values_sorted() {
        let mk = |y: i32, m: u32, temp: f64| {
            Record::new(
                NaiveDate::from_ymd_opt(y, m, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                temp,
                None,
                None,
                None,
                None,
                None,
            )
        };
        let ds = Dataset::from_records(vec![
            mk(2015, 6, 25.0),
            mk(2014, 1, 5.0),
            mk(2015, 6, 26.0),
        ]);
        assert_eq!(ds.years, vec![2014, 2015]);
        assert_eq!(ds.months, vec![1, 6]);
        assert_eq!(ds.seasons, vec![Season::Winter, Season::Summer]);
        assert_eq!(ds.len(), 3);
    }
}
