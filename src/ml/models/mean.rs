use super::most_frequent::weights_for;
use crate::error::{PanelSplitError, Result};
use crate::ml::traits::{Estimator, FittedEstimator};
use polars::prelude::*;

/// Regressor predicting the weighted mean of the training labels
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedMeanRegressor {
    name: PlSmallStr,
    mean: f64,
}

impl FittedMeanRegressor {
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl Estimator for MeanRegressor {
    type Fitted = FittedMeanRegressor;

    fn fit(
        &self,
        _x: &DataFrame,
        y: &Series,
        sample_weight: Option<&Series>,
    ) -> Result<Self::Fitted> {
        let weights = weights_for(y, sample_weight)?;
        let labels = y.cast(&DataType::Float64)?;

        let (sum, total) = labels
            .f64()?
            .into_iter()
            .zip(weights)
            .filter_map(|(v, w)| v.filter(|v| !v.is_nan()).map(|v| (v, w)))
            .fold((0.0, 0.0), |(sum, total), (v, w)| (sum + v * w, total + w));

        if total <= 0.0 {
            return Err(PanelSplitError::Estimator(
                "cannot fit on a training set without weighted labels".to_string(),
            ));
        }

        Ok(FittedMeanRegressor {
            name: y.name().clone(),
            mean: sum / total,
        })
    }
}

impl FittedEstimator for FittedMeanRegressor {
    fn predict(&self, x: &DataFrame) -> Result<Series> {
        Ok(Series::new(self.name.clone(), vec![self.mean; x.height()]))
    }
}
