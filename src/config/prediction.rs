use super::traits::ConfigSection;
use crate::error::{PanelSplitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a fitted estimator is applied to the test rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    #[default]
    Predict,
    PredictProba,
    PredictLogProba,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predict => "predict",
            Self::PredictProba => "predict_proba",
            Self::PredictLogProba => "predict_log_proba",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Predict, Self::PredictProba, Self::PredictLogProba]
    }
}

impl fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionMethod {
    type Err = PanelSplitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| {
                PanelSplitError::InvalidArgument(format!(
                    "Invalid prediction method '{}'. Supported values are 'predict', 'predict_proba', or 'predict_log_proba'",
                    s
                ))
            })
    }
}

/// Settings for cross-validated prediction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub method: PredictionMethod,
    /// Output column name; defaults to `<label>_pred` or `y_pred`
    pub y_pred_col: Option<String>,
    pub return_fitted_models: bool,
}

impl PredictionConfig {
    pub fn with_method(mut self, method: PredictionMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_column(mut self, name: impl Into<String>) -> Self {
        self.y_pred_col = Some(name.into());
        self
    }

    pub fn keep_models(mut self) -> Self {
        self.return_fitted_models = true;
        self
    }
}

impl ConfigSection for PredictionConfig {
    fn section_name() -> &'static str {
        "prediction"
    }

    fn validate(&self) -> Result<()> {
        if matches!(self.y_pred_col.as_deref(), Some("")) {
            return Err(PanelSplitError::Configuration(
                "y_pred_col must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for cross-validated imputation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationConfig {
    pub return_fitted_imputers: bool,
}

impl ImputationConfig {
    pub fn keep_imputers(mut self) -> Self {
        self.return_fitted_imputers = true;
        self
    }
}

impl ConfigSection for ImputationConfig {
    fn section_name() -> &'static str {
        "imputation"
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_methods() {
        assert_eq!("predict".parse::<PredictionMethod>().unwrap(), PredictionMethod::Predict);
        assert_eq!(
            "predict_proba".parse::<PredictionMethod>().unwrap(),
            PredictionMethod::PredictProba
        );
        assert_eq!(
            "predict_log_proba".parse::<PredictionMethod>().unwrap(),
            PredictionMethod::PredictLogProba
        );
    }

    #[test]
    fn test_unsupported_method_lists_valid_values() {
        let err = "decision_function".parse::<PredictionMethod>().unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, PanelSplitError::InvalidArgument(_)));
        assert!(message.contains("decision_function"));
        for method in PredictionMethod::all() {
            assert!(message.contains(method.as_str()));
        }
    }

    #[test]
    fn test_empty_column_name_rejected() {
        let config = PredictionConfig::default().with_column("");
        assert!(config.validate().is_err());
    }
}
