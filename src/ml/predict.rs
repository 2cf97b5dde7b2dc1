use super::progress::{FoldProgress, LogProgress};
use super::traits::{Estimator, FittedEstimator};
use crate::config::{ConfigSection, PredictionConfig, PredictionMethod};
use crate::error::{PanelSplitError, Result};
use crate::panel::validity::present_rows;
use crate::panel::{PanelSplit, Period};
use crate::types::to_mask;
use polars::prelude::*;

/// Row-aligned inputs for [`PanelSplit::cross_val_predict`]
#[derive(Debug, Clone, Copy)]
pub struct CrossValData<'a> {
    pub features: &'a DataFrame,
    pub labels: &'a Series,
    /// Identity columns copied into the prediction output
    pub index: &'a DataFrame,
    pub sample_weight: Option<&'a Series>,
}

impl<'a> CrossValData<'a> {
    pub fn new(features: &'a DataFrame, labels: &'a Series, index: &'a DataFrame) -> Self {
        Self {
            features,
            labels,
            index,
            sample_weight: None,
        }
    }

    pub fn with_sample_weight(mut self, sample_weight: &'a Series) -> Self {
        self.sample_weight = Some(sample_weight);
        self
    }

    fn check_rows(&self, n_rows: usize) -> Result<()> {
        let heights = [
            ("features", self.features.height()),
            ("labels", self.labels.len()),
            ("index", self.index.height()),
        ];
        for (what, actual) in heights {
            if actual != n_rows {
                return Err(PanelSplitError::length_mismatch(what, n_rows, actual));
            }
        }
        if let Some(w) = self.sample_weight.filter(|w| w.len() != n_rows) {
            return Err(PanelSplitError::length_mismatch("sample_weight", n_rows, w.len()));
        }
        Ok(())
    }
}

pub struct CrossValPrediction<M> {
    /// Index rows of every test fold, in fold order, with the prediction column
    pub predictions: DataFrame,
    pub fitted_models: Option<Vec<M>>,
}

/// `<label>_pred`, or `y_pred` for an unnamed label series
pub fn default_prediction_column(labels: &Series) -> String {
    if labels.name().is_empty() {
        "y_pred".to_string()
    } else {
        format!("{}_pred", labels.name())
    }
}

fn positive_class(proba: DataFrame, method: PredictionMethod) -> Result<Series> {
    let column = proba.select_at_idx(1).ok_or_else(|| {
        PanelSplitError::Estimator(format!(
            "{} returned {} columns, expected at least two classes",
            method,
            proba.width()
        ))
    })?;
    Ok(column.as_materialized_series().clone())
}

fn apply<M: FittedEstimator>(model: &M, x: &DataFrame, method: PredictionMethod) -> Result<Series> {
    match method {
        PredictionMethod::Predict => model.predict(x),
        PredictionMethod::PredictProba => positive_class(model.predict_proba(x)?, method),
        PredictionMethod::PredictLogProba => positive_class(model.predict_log_proba(x)?, method),
    }
}

impl<P: Period> PanelSplit<P> {
    pub fn cross_val_predict<E: Estimator>(
        &self,
        estimator: &E,
        data: CrossValData<'_>,
        options: &PredictionConfig,
    ) -> Result<CrossValPrediction<E::Fitted>> {
        let mut progress = LogProgress::new("cross_val_predict");
        self.cross_val_predict_with_progress(estimator, data, options, &mut progress)
    }

    /// Fit on each fold's labelled train rows and predict its test rows
    pub fn cross_val_predict_with_progress<E: Estimator>(
        &self,
        estimator: &E,
        data: CrossValData<'_>,
        options: &PredictionConfig,
        progress: &mut dyn FoldProgress,
    ) -> Result<CrossValPrediction<E::Fitted>> {
        options.validate()?;
        data.check_rows(self.n_rows())?;

        let column = options
            .y_pred_col
            .clone()
            .unwrap_or_else(|| default_prediction_column(data.labels));
        let present = present_rows(data.labels)?;
        let folds = self.split()?;
        let total = folds.len();

        let mut predictions: Option<DataFrame> = None;
        let mut fitted_models = Vec::with_capacity(total);

        for (i, fold) in folds.iter().enumerate() {
            progress.on_fold_start(i, total);

            let labelled: Vec<bool> = fold
                .train
                .iter()
                .zip(&present)
                .map(|(&train, &present)| train && present)
                .collect();
            let train_mask = to_mask("train", &labelled);
            let test_mask = fold.test_mask();

            let x_train = data.features.filter(&train_mask)?;
            let y_train = data.labels.filter(&train_mask)?;
            let w_train = data
                .sample_weight
                .map(|w| w.filter(&train_mask))
                .transpose()?;
            let x_test = data.features.filter(&test_mask)?;

            let model = estimator.fit(&x_train, &y_train, w_train.as_ref())?;
            let mut values = apply(&model, &x_test, options.method)?;
            if values.len() != x_test.height() {
                return Err(PanelSplitError::length_mismatch(
                    "fold predictions",
                    x_test.height(),
                    values.len(),
                ));
            }
            values.rename(column.as_str().into());

            let mut fold_frame = data.index.filter(&test_mask)?;
            fold_frame.with_column(values)?;
            match predictions.as_mut() {
                Some(all) => {
                    all.vstack_mut(&fold_frame)?;
                }
                None => predictions = Some(fold_frame),
            }

            fitted_models.push(model);
            progress.on_fold_complete(i, total);
        }

        let predictions = match predictions {
            Some(all) => all,
            None => {
                let mut empty = data.index.clear();
                empty.with_column(Series::new_empty(column.as_str().into(), &DataType::Float64))?;
                empty
            }
        };

        Ok(CrossValPrediction {
            predictions,
            fitted_models: options.return_fitted_models.then_some(fitted_models),
        })
    }
}
