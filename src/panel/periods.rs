//! Period column handling.

use crate::error::{PanelSplitError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashSet;
use std::hash::Hash;

/// Sorted, duplicate-free periods of a row-level period column
pub fn unique_periods<P: Ord + Clone>(periods: &[P]) -> Vec<P> {
    let mut unique = periods.to_vec();
    unique.sort();
    unique.dedup();
    unique
}

/// Check a caller-supplied unique period sequence.
///
/// The sequence is kept in the caller's order; duplicates are rejected.
pub(crate) fn validate_override<P: Hash + Eq + std::fmt::Debug>(unique: &[P]) -> Result<()> {
    let mut seen = HashSet::with_capacity(unique.len());
    for period in unique {
        if !seen.insert(period) {
            return Err(PanelSplitError::Configuration(format!(
                "unique_periods contains duplicate period {:?}",
                period
            )));
        }
    }
    Ok(())
}

/// Number of rows whose period is missing from `unique`
pub(crate) fn uncovered_rows<P: Hash + Eq>(rows: &[P], unique: &[P]) -> usize {
    let known: HashSet<&P> = unique.iter().collect();
    rows.iter().filter(|period| !known.contains(period)).count()
}

/// Integer periods from an integer, date or datetime column
pub fn periods_from_series(series: &Series) -> Result<Vec<i64>> {
    let as_i64 = series.cast(&DataType::Int64)?;
    collect_present(series, as_i64.i64()?.into_iter())
}

/// Calendar-date periods from a `Date` column
pub fn dates_from_series(series: &Series) -> Result<Vec<NaiveDate>> {
    collect_present(series, series.date()?.as_date_iter())
}

/// Label periods from a string column
pub fn labels_from_series(series: &Series) -> Result<Vec<String>> {
    collect_present(series, series.str()?.into_iter().map(|v| v.map(str::to_string)))
}

fn collect_present<T>(series: &Series, values: impl Iterator<Item = Option<T>>) -> Result<Vec<T>> {
    values
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                PanelSplitError::Validation(format!(
                    "Period column '{}' has a null at row {}",
                    series.name(),
                    row
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_periods_sorted() {
        let periods = vec![2022, 2020, 2021, 2020, 2022, 2023];
        assert_eq!(unique_periods(&periods), vec![2020, 2021, 2022, 2023]);
    }

    #[test]
    fn test_unique_periods_empty() {
        let periods: Vec<i64> = Vec::new();
        assert!(unique_periods(&periods).is_empty());
    }

    #[test]
    fn test_override_duplicates_rejected() {
        assert!(validate_override(&[1, 2, 2]).is_err());
        assert!(validate_override(&[3, 1, 2]).is_ok());
    }

    #[test]
    fn test_periods_from_series() {
        let series = Series::new("year".into(), &[2021i32, 2020, 2021]);
        assert_eq!(periods_from_series(&series).unwrap(), vec![2021, 2020, 2021]);
    }

    #[test]
    fn test_periods_from_series_rejects_nulls() {
        let series = Series::new("year".into(), &[Some(2021i64), None]);
        assert!(periods_from_series(&series).is_err());
    }

    #[test]
    fn test_dates_from_series() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
        ];
        let series = Series::new("month".into(), dates.clone());
        assert_eq!(dates_from_series(&series).unwrap(), dates);
    }

    #[test]
    fn test_labels_from_series() {
        let series = Series::new("quarter".into(), &["2020Q1", "2020Q2"]);
        assert_eq!(
            labels_from_series(&series).unwrap(),
            vec!["2020Q1".to_string(), "2020Q2".to_string()]
        );
    }
}
