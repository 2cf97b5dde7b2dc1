use super::progress::{FoldProgress, LogProgress};
use super::traits::{FittedImputer, Imputer};
use crate::config::ImputationConfig;
use crate::error::{PanelSplitError, Result};
use crate::panel::{PanelSplit, Period};
use crate::types::to_mask;
use polars::prelude::*;

pub struct CrossValImputation<F> {
    /// Copy of the features, original dtypes kept, with every fold's test rows imputed
    pub imputed: DataFrame,
    pub fitted_imputers: Option<Vec<F>>,
}

/// Overwrite the rows selected by `mask` with the rows of `filled`, in order.
///
/// Each replacement column is strictly cast back to the working column's dtype,
/// so an imputer can never silently change the type of untouched rows.
fn write_rows(working: &mut DataFrame, filled: &DataFrame, mask: &[bool]) -> Result<()> {
    if !mask.iter().any(|&selected| selected) {
        return Ok(());
    }

    // row -> position among the selected rows; unselected rows point at 0 and
    // are discarded by the zip below
    let mut next: IdxSize = 0;
    let positions: Vec<IdxSize> = mask
        .iter()
        .map(|&selected| {
            if selected {
                next += 1;
                next - 1
            } else {
                0
            }
        })
        .collect();
    let positions = IdxCa::from_vec("positions".into(), positions);
    let selected = to_mask("test", mask);

    let names: Vec<PlSmallStr> = working.get_column_names().into_iter().cloned().collect();
    for name in names {
        let current = working.column(name.as_str())?.as_materialized_series().clone();
        let replacement = filled
            .column(name.as_str())?
            .as_materialized_series()
            .strict_cast(current.dtype())
            .map_err(|e| {
                PanelSplitError::Validation(format!(
                    "imputed column '{}' cannot be cast back to {}: {}",
                    name,
                    current.dtype(),
                    e
                ))
            })?;

        let merged = replacement
            .take(&positions)?
            .zip_with(&selected, &current)?
            .with_name(name);
        working.with_column(merged)?;
    }
    Ok(())
}

impl<P: Period> PanelSplit<P> {
    pub fn cross_val_impute<I: Imputer>(
        &self,
        imputer: &I,
        features: &DataFrame,
        options: &ImputationConfig,
    ) -> Result<CrossValImputation<I::Fitted>> {
        let mut progress = LogProgress::new("cross_val_impute");
        self.cross_val_impute_with_progress(imputer, features, options, &mut progress)
    }

    /// Impute each fold's test rows from an imputer fitted on its train rows.
    ///
    /// Folds run in order over one working copy, so later folds fit on values
    /// already filled in by earlier ones.
    pub fn cross_val_impute_with_progress<I: Imputer>(
        &self,
        imputer: &I,
        features: &DataFrame,
        options: &ImputationConfig,
        progress: &mut dyn FoldProgress,
    ) -> Result<CrossValImputation<I::Fitted>> {
        if features.height() != self.n_rows() {
            return Err(PanelSplitError::length_mismatch(
                "features",
                self.n_rows(),
                features.height(),
            ));
        }

        let mut working = features.clone();

        let folds = self.split()?;
        let total = folds.len();
        let mut fitted_imputers = Vec::with_capacity(total);

        for (i, fold) in folds.iter().enumerate() {
            progress.on_fold_start(i, total);

            let x_train = working.filter(&fold.train_mask())?;
            let x_test = working.filter(&fold.test_mask())?;

            let fitted = imputer.fit(&x_train)?;
            let filled = fitted.transform(&x_test)?;
            if filled.shape() != x_test.shape() {
                return Err(PanelSplitError::Estimator(format!(
                    "imputer returned shape {:?} for input of shape {:?}",
                    filled.shape(),
                    x_test.shape()
                )));
            }

            write_rows(&mut working, &filled, &fold.test)?;
            fitted_imputers.push(fitted);
            progress.on_fold_complete(i, total);
        }

        Ok(CrossValImputation {
            imputed: working,
            fitted_imputers: options.return_fitted_imputers.then_some(fitted_imputers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_write_rows_only_touches_mask() {
        let mut working = df! { "a" => &[Some(1.0), None, None, Some(4.0)] }.unwrap();
        let filled = df! { "a" => &[9.0, 8.0] }.unwrap();

        write_rows(&mut working, &filled, &[false, true, false, true]).unwrap();

        let a = working.column("a").unwrap().as_materialized_series().clone();
        let values: Vec<Option<f64>> = a.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1.0), Some(9.0), None, Some(8.0)]);
    }

    #[test]
    fn test_write_rows_keeps_dtype() {
        let mut working = df! {
            "n" => &[Some(1i64), None, Some(3)],
            "s" => &["x", "y", "z"],
        }
        .unwrap();
        let filled = df! { "n" => &[2.0], "s" => &["y"] }.unwrap();

        write_rows(&mut working, &filled, &[false, true, false]).unwrap();

        assert_eq!(working.column("n").unwrap().dtype(), &DataType::Int64);
        assert_eq!(working.column("s").unwrap().dtype(), &DataType::String);
        let n: Vec<Option<i64>> = working
            .column("n")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(n, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_write_rows_rejects_uncastable_replacement() {
        let mut working = df! { "n" => &[1i64, 2] }.unwrap();
        let filled = df! { "n" => &["not a number"] }.unwrap();

        let result = write_rows(&mut working, &filled, &[true, false]);
        assert!(matches!(result, Err(PanelSplitError::Validation(_))));
    }
}
