use super::model::{Dataset, Pollutant};

// ---------------------------------------------------------------------------
// Descriptive statistics over a filtered subset
// ---------------------------------------------------------------------------

/// Arithmetic mean of one pollutant over the given record indices, excluding
/// missing cells. `None` when the subset has no non-missing value for the
/// column; a missing cell is never treated as zero.
pub fn mean_of(dataset: &Dataset, indices: &[usize], pollutant: Pollutant) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &i in indices {
        if let Some(v) = dataset.records[i].pollutant(pollutant) {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Mean concentration for every pollutant column over the subset.
pub fn pollutant_means(dataset: &Dataset, indices: &[usize]) -> Vec<(Pollutant, Option<f64>)> {
    Pollutant::ALL
        .into_iter()
        .map(|p| (p, mean_of(dataset, indices, p)))
        .collect()
}

/// Five-number summary (min, q1, median, q3, max) of one pollutant over the
/// subset, for the distribution box plot. `None` when no values exist.
pub fn quartiles(
    dataset: &Dataset,
    indices: &[usize],
    pollutant: Pollutant,
) -> Option<(f64, f64, f64, f64, f64)> {
    let mut values: Vec<f64> = indices
        .iter()
        .filter_map(|&i| dataset.records[i].pollutant(pollutant))
        .collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    // A single reading is its own whole distribution.
    if let [v] = values[..] {
        return Some((v, v, v, v, v));
    }

    let median = median_of(&values);
    // Midpoint split: lower half excludes the median element for odd n.
    let half = values.len() / 2;
    let q1 = median_of(&values[..half]);
    let q3 = if values.len() % 2 == 0 {
        median_of(&values[half..])
    } else {
        median_of(&values[half + 1..])
    };

    Some((values[0], q1, median, q3, values[values.len() - 1]))
}

fn median_of(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Subset indices reordered by record timestamp, for the time-series chart.
/// Ties keep source order (stable sort).
pub fn ordered_by_datetime(dataset: &Dataset, indices: &[usize]) -> Vec<usize> {
    let mut out = indices.to_vec();
    out.sort_by_key(|&i| dataset.records[i].datetime);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use chrono::NaiveDate;

    fn mk(day: u32, no2: Option<f64>) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2016, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            5.0,
            no2,
            None,
            None,
            None,
            None,
        )
    }

    #[test]
    fn mean_excludes_missing_values() {
        let ds = Dataset::from_records(vec![mk(1, Some(10.0)), mk(2, Some(20.0)), mk(3, None)]);
        assert_eq!(mean_of(&ds, &[0, 1, 2], Pollutant::No2), Some(15.0));
    }

    #[test]
    fn mean_of_all_missing_is_none() {
        let ds = Dataset::from_records(vec![mk(1, None), mk(2, None)]);
        assert_eq!(mean_of(&ds, &[0, 1], Pollutant::No2), None);
        // Column absent entirely behaves the same.
        assert_eq!(mean_of(&ds, &[0, 1], Pollutant::O3), None);
    }

    #[test]
    fn mean_over_empty_subset_is_none() {
        let ds = Dataset::from_records(vec![mk(1, Some(10.0))]);
        assert_eq!(mean_of(&ds, &[], Pollutant::No2), None);
    }

    #[test]
    fn pollutant_means_covers_every_column() {
        let ds = Dataset::from_records(vec![mk(1, Some(10.0))]);
        let means = pollutant_means(&ds, &[0]);
        assert_eq!(means.len(), Pollutant::ALL.len());
        assert_eq!(means[0], (Pollutant::No2, Some(10.0)));
        assert_eq!(means[1], (Pollutant::So2, None));
    }

    #[test]
    fn quartiles_odd_count() {
        let ds = Dataset::from_records(
            [1.0, 2.0, 3.0, 4.0, 5.0]
                .iter()
                .enumerate()
                .map(|(i, &v)| mk(i as u32 + 1, Some(v)))
                .collect(),
        );
        let (min, q1, med, q3, max) = quartiles(&ds, &[0, 1, 2, 3, 4], Pollutant::No2).unwrap();
        assert_eq!((min, q1, med, q3, max), (1.0, 1.5, 3.0, 4.5, 5.0));
    }

    #[test]
    fn quartiles_even_count() {
        let ds = Dataset::from_records(
            [1.0, 2.0, 3.0, 4.0]
                .iter()
                .enumerate()
                .map(|(i, &v)| mk(i as u32 + 1, Some(v)))
                .collect(),
        );
        let (min, q1, med, q3, max) = quartiles(&ds, &[0, 1, 2, 3], Pollutant::No2).unwrap();
        assert_eq!((min, q1, med, q3, max), (1.0, 1.5, 2.5, 3.5, 4.0));
    }

    #[test]
    fn quartiles_single_value_collapses_to_that_value() {
        let ds = Dataset::from_records(vec![mk(1, Some(42.0)), mk(2, None)]);
        let summary = quartiles(&ds, &[0, 1], Pollutant::No2).unwrap();
        assert_eq!(summary, (42.0, 42.0, 42.0, 42.0, 42.0));
    }

    #[test]
    fn quartiles_two_values() {
        let ds = Dataset::from_records(vec![mk(1, Some(1.0)), mk(2, Some(2.0))]);
        let (min, q1, med, q3, max) = quartiles(&ds, &[0, 1], Pollutant::No2).unwrap();
        assert_eq!((min, q1, med, q3, max), (1.0, 1.0, 1.5, 2.0, 2.0));
    }

    #[test]
    fn quartiles_none_when_no_values() {
        let ds = Dataset::from_records(vec![mk(1, None)]);
        assert_eq!(quartiles(&ds, &[0], Pollutant::No2), None);
    }

    #[test]
    fn datetime_ordering_is_stable() {
        let ds = Dataset::from_records(vec![mk(3, None), mk(1, None), mk(2, None)]);
        assert_eq!(ordered_by_datetime(&ds, &[0, 1, 2]), vec![1, 2, 0]);
    }
}
