use crate::error::{PanelSplitError, Result};
use crate::ml::traits::{Estimator, FittedEstimator};
use polars::prelude::*;

/// Classifier that always predicts the (weighted) most frequent training label.
///
/// Labels are read as `f64`; missing labels are ignored.
#[derive(Debug, Clone, Default)]
pub struct MostFrequentClassifier;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedMostFrequent {
    name: PlSmallStr,
    classes: Vec<f64>,
    priors: Vec<f64>,
}

impl FittedMostFrequent {
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// First class with the largest prior
    pub fn majority(&self) -> f64 {
        let mut best = 0;
        for (i, prior) in self.priors.iter().enumerate() {
            if *prior > self.priors[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

pub(crate) fn weights_for(y: &Series, sample_weight: Option<&Series>) -> Result<Vec<f64>> {
    match sample_weight {
        Some(w) if w.len() != y.len() => Err(PanelSplitError::length_mismatch(
            "sample_weight",
            y.len(),
            w.len(),
        )),
        Some(w) => {
            let w = w.cast(&DataType::Float64)?;
            Ok(w.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect())
        }
        None => Ok(vec![1.0; y.len()]),
    }
}

impl Estimator for MostFrequentClassifier {
    type Fitted = FittedMostFrequent;

    fn fit(
        &self,
        _x: &DataFrame,
        y: &Series,
        sample_weight: Option<&Series>,
    ) -> Result<Self::Fitted> {
        let weights = weights_for(y, sample_weight)?;
        let labels = y.cast(&DataType::Float64)?;

        let mut counts: Vec<(f64, f64)> = Vec::new();
        for (label, weight) in labels.f64()?.into_iter().zip(weights) {
            let Some(label) = label.filter(|v| !v.is_nan()) else {
                continue;
            };
            match counts.iter_mut().find(|(class, _)| *class == label) {
                Some((_, total)) => *total += weight,
                None => counts.push((label, weight)),
            }
        }

        if counts.is_empty() {
            return Err(PanelSplitError::Estimator(
                "cannot fit on a training set without labels".to_string(),
            ));
        }

        counts.sort_by(|a, b| a.0.total_cmp(&b.0));
        let total: f64 = counts.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(PanelSplitError::Estimator(
                "sample weights sum to zero".to_string(),
            ));
        }

        Ok(FittedMostFrequent {
            name: y.name().clone(),
            classes: counts.iter().map(|(class, _)| *class).collect(),
            priors: counts.iter().map(|(_, w)| w / total).collect(),
        })
    }
}

impl FittedEstimator for FittedMostFrequent {
    fn predict(&self, x: &DataFrame) -> Result<Series> {
        Ok(Series::new(self.name.clone(), vec![self.majority(); x.height()]))
    }

    fn predict_proba(&self, x: &DataFrame) -> Result<DataFrame> {
        let columns = self
            .classes
            .iter()
            .zip(&self.priors)
            .map(|(class, prior)| {
                Series::new(format!("proba_{}", class).into(), vec![*prior; x.height()])
                    .into_column()
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}
