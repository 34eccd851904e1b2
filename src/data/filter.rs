use super::model::{Dataset, Season};

// ---------------------------------------------------------------------------
// Selection – the resolved state of the sidebar selectors
// ---------------------------------------------------------------------------

/// The user's current filter choices. `None` means "no constraint" for that
/// dimension; the season dimension is the one selector the dashboard always
/// offers, but it too can be unconstrained (before a dataset is shown).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub season: Option<Season>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl Selection {
    /// Default selection for a freshly loaded dataset: first season present,
    /// year and month unconstrained.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Selection {
            season: dataset.seasons.first().copied(),
            year: None,
            month: None,
        }
    }
}

/// Return indices of records matching every active constraint, preserving
/// source order. An empty result is a valid outcome, not an error.
pub fn filtered_indices(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            selection.season.map_or(true, |s| r.season == s)
                && selection.year.map_or(true, |y| r.year == y)
                && selection.month.map_or(true, |m| r.month == m)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use chrono::NaiveDate;

    fn mk(y: i32, m: u32, d: u32, temp: f64) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(y, m, d)
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
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            mk(2015, 1, 1, 5.0),   // Winter
            mk(2015, 7, 1, 25.0),  // Summer
            mk(2016, 7, 1, 27.0),  // Summer
            mk(2016, 7, 2, 25.5),  // Summer
            mk(2016, 12, 1, -3.0), // ColdWave
        ])
    }

    #[test]
    fn season_filter_keeps_only_matching_rows_in_order() {
        let ds = sample();
        let sel = Selection {
            season: Some(Season::Summer),
            ..Default::default()
        };
        let idx = filtered_indices(&ds, &sel);
        assert_eq!(idx, vec![1, 2, 3]);
        for &i in &idx {
            assert!((20.0..30.0).contains(&ds.records[i].temp));
        }
    }

    #[test]
    fn all_three_dimensions_combine() {
        let ds = sample();
        let sel = Selection {
            season: Some(Season::Summer),
            year: Some(2016),
            month: Some(7),
        };
        assert_eq!(filtered_indices(&ds, &sel), vec![2, 3]);
    }

    #[test]
    fn no_constraints_returns_everything() {
        let ds = sample();
        assert_eq!(
            filtered_indices(&ds, &Selection::default()),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn empty_match_is_an_empty_vec_not_an_error() {
        let ds = sample();
        let sel = Selection {
            season: Some(Season::HeatWave),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn default_selection_picks_first_present_season() {
        let ds = sample();
        let sel = Selection::for_dataset(&ds);
        assert_eq!(sel.season, Some(Season::ColdWave));
        assert_eq!(sel.year, None);
        assert_eq!(sel.month, None);
    }
}
