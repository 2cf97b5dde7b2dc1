use super::traits::ConfigSection;
use crate::error::{PanelSplitError, Result};
use serde::{Deserialize, Serialize};

/// Fold construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub n_splits: usize,
    pub gap: usize,
    pub test_size: Option<usize>,
    pub max_train_size: Option<usize>,
    /// Log a text chart of the folds at construction
    pub plot: bool,
    /// Drop folds whose train or test labels are empty or constant
    pub drop_folds: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            n_splits: 5,
            gap: 0,
            test_size: None,
            max_train_size: None,
            plot: false,
            drop_folds: false,
        }
    }
}

impl ConfigSection for SplitConfig {
    fn section_name() -> &'static str {
        "split"
    }

    fn validate(&self) -> Result<()> {
        if self.n_splits < 2 {
            return Err(PanelSplitError::Configuration(format!(
                "n_splits must be at least 2, got {}",
                self.n_splits
            )));
        }
        if self.test_size == Some(0) {
            return Err(PanelSplitError::Configuration(
                "test_size must be at least 1".to_string(),
            ));
        }
        if self.max_train_size == Some(0) {
            return Err(PanelSplitError::Configuration(
                "max_train_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
