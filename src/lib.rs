//! Period-aware cross-validation for panel data.
//!
//! Rows that share a time period always land on the same side of a fold, so
//! no future period leaks into a training set. Folds are chosen over the
//! sorted unique periods by an [`splitters::IntervalSelector`] and projected
//! back onto rows as boolean masks.

pub mod config;
pub mod data;
pub mod error;
pub mod ml;
pub mod panel;
pub mod splitters;
pub mod types;

pub use config::{ConfigManager, PanelConfig, PredictionConfig, PredictionMethod, SplitConfig};
pub use error::{PanelSplitError, Result};
pub use panel::{PanelSplit, PanelSplitBuilder};
pub use types::{Diagnostic, DiagnosticLevel, PeriodFold, RowFold};
