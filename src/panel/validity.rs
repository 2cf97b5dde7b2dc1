//! Degenerate fold detection.

use crate::error::Result;
use crate::types::{to_mask, RowFold};
use polars::prelude::*;
use std::fmt;

/// Why a fold cannot be used for fitting or scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDefect {
    EmptyTrain,
    EmptyTest,
    ConstantTrainLabels,
    ConstantTestLabels,
}

impl fmt::Display for FoldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyTrain => "the train set is empty",
            Self::EmptyTest => "the test set is empty",
            Self::ConstantTrainLabels => "the train labels contain only one unique value",
            Self::ConstantTestLabels => "the test labels contain only one unique value",
        };
        f.write_str(reason)
    }
}

/// Rows whose label is present (not null, and not NaN for float labels)
pub fn present_rows(labels: &Series) -> Result<Vec<bool>> {
    let not_null = labels.is_not_null();
    let mut present: Vec<bool> = (&not_null)
        .into_iter()
        .map(|v| v.unwrap_or(false))
        .collect();

    if labels.dtype().is_float() {
        let as_f64 = labels.cast(&DataType::Float64)?;
        for (flag, value) in present.iter_mut().zip(as_f64.f64()?.into_iter()) {
            if value.is_some_and(f64::is_nan) {
                *flag = false;
            }
        }
    }

    Ok(present)
}

/// Distinct present label values among the selected rows
fn distinct_labels(labels: &Series, selected: &[bool], present: &[bool]) -> Result<usize> {
    let keep: Vec<bool> = selected
        .iter()
        .zip(present)
        .map(|(&s, &p)| s && p)
        .collect();
    Ok(labels.filter(&to_mask("labels", &keep))?.n_unique()?)
}

/// Check a fold for empty sides, then for single-valued labels on either side.
///
/// `present` must come from [`present_rows`] on the same `labels`.
pub fn assess(fold: &RowFold, labels: &Series, present: &[bool]) -> Result<Option<FoldDefect>> {
    if fold.train_count() == 0 {
        return Ok(Some(FoldDefect::EmptyTrain));
    }
    if fold.test_count() == 0 {
        return Ok(Some(FoldDefect::EmptyTest));
    }
    if distinct_labels(labels, &fold.train, present)? == 1 {
        return Ok(Some(FoldDefect::ConstantTrainLabels));
    }
    if distinct_labels(labels, &fold.test, present)? == 1 {
        return Ok(Some(FoldDefect::ConstantTestLabels));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(train: &[bool], test: &[bool]) -> RowFold {
        RowFold {
            train: train.to_vec(),
            test: test.to_vec(),
            fold_num: 0,
        }
    }

    #[test]
    fn test_present_rows_float() {
        let labels = Series::new("y".into(), &[Some(1.0), None, Some(f64::NAN), Some(0.0)]);
        assert_eq!(present_rows(&labels).unwrap(), vec![true, false, false, true]);
    }

    #[test]
    fn test_varied_fold_is_valid() {
        let labels = Series::new("y".into(), &[0i32, 1, 0, 1]);
        let present = present_rows(&labels).unwrap();
        let f = fold(&[true, true, false, false], &[false, false, true, true]);

        assert_eq!(assess(&f, &labels, &present).unwrap(), None);
    }

    #[test]
    fn test_empty_sides() {
        let labels = Series::new("y".into(), &[0i32, 1]);
        let present = present_rows(&labels).unwrap();

        let f = fold(&[false, false], &[true, true]);
        assert_eq!(assess(&f, &labels, &present).unwrap(), Some(FoldDefect::EmptyTrain));

        let f = fold(&[true, true], &[false, false]);
        assert_eq!(assess(&f, &labels, &present).unwrap(), Some(FoldDefect::EmptyTest));
    }

    #[test]
    fn test_constant_test_labels() {
        let labels = Series::new("y".into(), &[0i32, 1, 1, 1]);
        let present = present_rows(&labels).unwrap();
        let f = fold(&[true, true, false, false], &[false, false, true, true]);

        assert_eq!(
            assess(&f, &labels, &present).unwrap(),
            Some(FoldDefect::ConstantTestLabels)
        );
    }

    #[test]
    fn test_missing_labels_not_counted() {
        // the null does not count as a second value
        let labels = Series::new("y".into(), &[Some(0i32), Some(1), Some(1), None]);
        let present = present_rows(&labels).unwrap();
        let f = fold(&[true, true, false, false], &[false, false, true, true]);

        assert_eq!(
            assess(&f, &labels, &present).unwrap(),
            Some(FoldDefect::ConstantTestLabels)
        );
    }
}
