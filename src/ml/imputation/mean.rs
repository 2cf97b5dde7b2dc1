use crate::error::{PanelSplitError, Result};
use crate::ml::traits::{FittedImputer, Imputer};
use polars::prelude::*;

/// Fills missing entries (null or NaN) in numeric columns with the training
/// column mean. Other columns pass through unchanged.
#[derive(Debug, Clone)]
pub struct MeanImputer {
    /// Used for columns with no observed training values
    fill_value: f64,
}

impl Default for MeanImputer {
    fn default() -> Self {
        Self { fill_value: 0.0 }
    }
}

impl MeanImputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedMeanImputer {
    statistics: Vec<(PlSmallStr, f64)>,
}

impl FittedMeanImputer {
    pub fn statistic(&self, column: &str) -> Option<f64> {
        self.statistics
            .iter()
            .find(|(name, _)| name.as_str() == column)
            .map(|(_, value)| *value)
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_float() || dtype.is_integer()
}

fn observed_mean(series: &Series) -> Result<Option<f64>> {
    let values = series.cast(&DataType::Float64)?;
    let (sum, count) = values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    Ok((count > 0).then(|| sum / count as f64))
}

impl Imputer for MeanImputer {
    type Fitted = FittedMeanImputer;

    fn fit(&self, x: &DataFrame) -> Result<Self::Fitted> {
        let statistics = x
            .get_columns()
            .iter()
            .filter(|column| is_numeric(column.dtype()))
            .map(|column| {
                let mean = observed_mean(column.as_materialized_series())?;
                Ok((column.name().clone(), mean.unwrap_or(self.fill_value)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FittedMeanImputer { statistics })
    }
}

impl FittedImputer for FittedMeanImputer {
    fn transform(&self, x: &DataFrame) -> Result<DataFrame> {
        let columns = x
            .get_columns()
            .iter()
            .map(|column| {
                if !is_numeric(column.dtype()) {
                    return Ok(column.clone());
                }
                let fill = self.statistic(column.name()).ok_or_else(|| {
                    PanelSplitError::Validation(format!(
                        "Column '{}' was not seen during fit",
                        column.name()
                    ))
                })?;
                let values = column.as_materialized_series().cast(&DataType::Float64)?;
                let filled: Float64Chunked = values
                    .f64()?
                    .into_iter()
                    .map(|v| Some(v.filter(|v| !v.is_nan()).unwrap_or(fill)))
                    .collect();
                Ok(filled.with_name(column.name().clone()).into_series().into_column())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new(columns)?)
    }
}
