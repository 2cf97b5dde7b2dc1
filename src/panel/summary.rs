use super::projector::project;
use super::splitter::{PanelSplit, Period};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldSummary {
    pub fold: usize,
    pub train_periods: usize,
    pub test_periods: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_start: Option<String>,
    pub train_end: Option<String>,
    pub test_start: Option<String>,
    pub test_end: Option<String>,
}

/// Serialisable overview of a [`PanelSplit`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub n_splits: usize,
    pub n_periods: usize,
    pub n_rows: usize,
    pub folds: Vec<FoldSummary>,
}

impl SplitSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn bound<P: Period>(period: Option<&P>) -> Option<String> {
    period.map(|p| format!("{:?}", p))
}

impl<P: Period> PanelSplit<P> {
    /// Per-fold bounds and row counts over the construction dataset
    pub fn summary(&self) -> SplitSummary {
        let folds = self
            .period_folds()
            .iter()
            .map(|periods| (periods, project(periods, self.periods())))
            .map(|(periods, rows)| FoldSummary {
                fold: periods.fold_num,
                train_periods: periods.train.len(),
                test_periods: periods.test.len(),
                train_rows: rows.train_count(),
                test_rows: rows.test_count(),
                train_start: bound(periods.train.iter().min()),
                train_end: bound(periods.train.iter().max()),
                test_start: bound(periods.test.iter().min()),
                test_end: bound(periods.test.iter().max()),
            })
            .collect();

        SplitSummary {
            n_splits: self.split_count(),
            n_periods: self.unique_periods().len(),
            n_rows: self.n_rows(),
            folds,
        }
    }
}
