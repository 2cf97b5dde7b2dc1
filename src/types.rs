use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fold expressed as period values, before projection onto rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFold<P> {
    pub train: Vec<P>,
    pub test: Vec<P>,
    /// Position in the selector's output, kept after folds are dropped
    pub fold_num: usize,
}

/// A fold expressed as row-membership masks over the whole dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFold {
    pub train: Vec<bool>,
    pub test: Vec<bool>,
    pub fold_num: usize,
}

impl RowFold {
    pub fn train_count(&self) -> usize {
        self.train.iter().filter(|&&selected| selected).count()
    }

    pub fn test_count(&self) -> usize {
        self.test.iter().filter(|&&selected| selected).count()
    }

    pub fn train_mask(&self) -> BooleanChunked {
        to_mask("train", &self.train)
    }

    pub fn test_mask(&self) -> BooleanChunked {
        to_mask("test", &self.test)
    }

    /// Row positions selected for training
    pub fn train_rows(&self) -> Vec<usize> {
        selected_rows(&self.train)
    }

    /// Row positions selected for testing
    pub fn test_rows(&self) -> Vec<usize> {
        selected_rows(&self.test)
    }
}

pub(crate) fn to_mask(name: &str, selected: &[bool]) -> BooleanChunked {
    BooleanChunked::from_slice(name.into(), selected)
}

fn selected_rows(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(row, &selected)| selected.then_some(row))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// Record of a non-fatal event raised while building folds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub fold: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn info(fold: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            fold,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            fold: None,
            message: message.into(),
        }
    }

    /// Forward to the `log` facade
    pub(crate) fn emit(&self) {
        match self.level {
            DiagnosticLevel::Info => log::info!("{}", self.message),
            DiagnosticLevel::Warning => log::warn!("{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warning => "warning",
        };
        write!(f, "[{}] {}", level, self.message)
    }
}
