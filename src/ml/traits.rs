//! Capabilities consumed by the cross-validated appliers.
//!
//! `fit` takes `&self` and returns a new fitted value, so a template estimator
//! is never mutated and each fold starts from a fresh instance.

use crate::error::{PanelSplitError, Result};
use polars::prelude::*;

pub trait Estimator {
    type Fitted: FittedEstimator;

    fn fit(&self, x: &DataFrame, y: &Series, sample_weight: Option<&Series>)
        -> Result<Self::Fitted>;
}

pub trait FittedEstimator {
    /// One prediction per row of `x`
    fn predict(&self, x: &DataFrame) -> Result<Series>;

    /// One column per class, in sorted class order
    fn predict_proba(&self, _x: &DataFrame) -> Result<DataFrame> {
        Err(PanelSplitError::InvalidArgument(
            "estimator does not support predict_proba".to_string(),
        ))
    }

    /// Natural log of [`FittedEstimator::predict_proba`]
    fn predict_log_proba(&self, x: &DataFrame) -> Result<DataFrame> {
        let proba = self.predict_proba(x)?;
        let columns = proba
            .get_columns()
            .iter()
            .map(|column| {
                let as_f64 = column.as_materialized_series().cast(&DataType::Float64)?;
                let logged = as_f64.f64()?.apply_values(f64::ln);
                Ok(logged.into_series().into_column())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new(columns)?)
    }
}

pub trait Imputer {
    type Fitted: FittedImputer;

    fn fit(&self, x: &DataFrame) -> Result<Self::Fitted>;
}

pub trait FittedImputer {
    /// Same shape as `x`, with missing entries filled
    fn transform(&self, x: &DataFrame) -> Result<DataFrame>;
}
