use super::chart::render_chart;
use super::periods::{unique_periods, uncovered_rows, validate_override};
use super::projector::project;
use super::validity::{assess, present_rows};
use crate::config::{ConfigSection, SplitConfig};
use crate::error::{PanelSplitError, Result};
use crate::splitters::{IntervalSelector, TimeSeriesSplitter};
use crate::types::{Diagnostic, PeriodFold, RowFold};
use polars::prelude::*;
use std::fmt::Debug;
use std::hash::Hash;

/// Bounds required of a period value
pub trait Period: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> Period for T {}

/// Period-aware cross-validation over panel data.
///
/// Every row sharing a period lands on the same side of each fold. Period
/// folds are fixed at construction; row masks are re-projected on each call
/// to [`PanelSplit::split`].
#[derive(Debug, Clone)]
pub struct PanelSplit<P> {
    unique_periods: Vec<P>,
    period_folds: Vec<PeriodFold<P>>,
    all_periods: Vec<P>,
    labels: Option<Series>,
    drop_folds: bool,
    n_splits: usize,
    diagnostics: Vec<Diagnostic>,
}

pub struct PanelSplitBuilder<P> {
    train_periods: Vec<P>,
    unique_periods: Option<Vec<P>>,
    config: SplitConfig,
    labels: Option<Series>,
    selector: Option<Box<dyn IntervalSelector>>,
}

impl<P: Period> PanelSplitBuilder<P> {
    pub fn unique_periods(mut self, unique_periods: Vec<P>) -> Self {
        self.unique_periods = Some(unique_periods);
        self
    }

    pub fn config(mut self, config: SplitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn n_splits(mut self, n_splits: usize) -> Self {
        self.config.n_splits = n_splits;
        self
    }

    pub fn gap(mut self, gap: usize) -> Self {
        self.config.gap = gap;
        self
    }

    pub fn test_size(mut self, test_size: usize) -> Self {
        self.config.test_size = Some(test_size);
        self
    }

    pub fn max_train_size(mut self, max_train_size: usize) -> Self {
        self.config.max_train_size = Some(max_train_size);
        self
    }

    pub fn plot(mut self, plot: bool) -> Self {
        self.config.plot = plot;
        self
    }

    pub fn drop_folds(mut self, drop_folds: bool) -> Self {
        self.config.drop_folds = drop_folds;
        self
    }

    /// Row-aligned labels used to detect degenerate folds
    pub fn labels(mut self, labels: Series) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Replace the default [`TimeSeriesSplitter`]
    pub fn selector(mut self, selector: Box<dyn IntervalSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn build(self) -> Result<PanelSplit<P>> {
        let PanelSplitBuilder {
            train_periods,
            unique_periods: unique_override,
            config,
            labels,
            selector,
        } = self;

        config.validate()?;

        if config.drop_folds && labels.is_none() {
            return Err(PanelSplitError::Configuration(
                "Cannot drop folds without specifying labels".to_string(),
            ));
        }

        let mut diagnostics = Vec::new();
        let labels = match labels {
            Some(_) if !config.drop_folds => {
                diagnostics.push(Diagnostic::warning(
                    "Ignoring labels because drop_folds is false",
                ));
                None
            }
            Some(labels) if labels.len() != train_periods.len() => {
                return Err(PanelSplitError::length_mismatch(
                    "labels",
                    train_periods.len(),
                    labels.len(),
                ));
            }
            labels => labels,
        };

        let unique = match unique_override {
            Some(unique) => {
                validate_override(&unique)?;
                let uncovered = uncovered_rows(&train_periods, &unique);
                if uncovered > 0 {
                    diagnostics.push(Diagnostic::warning(format!(
                        "{} rows have a period outside unique_periods and will never be selected",
                        uncovered
                    )));
                }
                unique
            }
            None => unique_periods(&train_periods),
        };

        let selector = selector.unwrap_or_else(|| {
            Box::new(TimeSeriesSplitter::from_config(&config)) as Box<dyn IntervalSelector>
        });
        let index_folds = selector.split(unique.len())?;

        let period_folds = index_folds
            .iter()
            .enumerate()
            .map(|(fold_num, fold)| {
                if let Some(max) = fold.max_position().filter(|&max| max >= unique.len()) {
                    return Err(PanelSplitError::Validation(format!(
                        "Selector returned position {} for {} periods",
                        max,
                        unique.len()
                    )));
                }
                Ok(PeriodFold {
                    train: fold.train.iter().map(|&i| unique[i].clone()).collect(),
                    test: fold.test.iter().map(|&i| unique[i].clone()).collect(),
                    fold_num,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut panel = PanelSplit {
            unique_periods: unique,
            n_splits: period_folds.len(),
            period_folds,
            all_periods: train_periods,
            labels,
            drop_folds: config.drop_folds,
            diagnostics,
        };

        if panel.drop_folds {
            panel.drop_degenerate_folds()?;
        }

        for diagnostic in &panel.diagnostics {
            diagnostic.emit();
        }

        if config.plot {
            log::info!("\n{}", panel.render_chart());
        }

        Ok(panel)
    }
}

impl<P: Period> PanelSplit<P> {
    pub fn builder(train_periods: Vec<P>) -> PanelSplitBuilder<P> {
        PanelSplitBuilder {
            train_periods,
            unique_periods: None,
            config: SplitConfig::default(),
            labels: None,
            selector: None,
        }
    }

    /// Construct from a config section, as loaded by `ConfigManager`
    pub fn from_config(
        train_periods: Vec<P>,
        config: &SplitConfig,
        labels: Option<Series>,
    ) -> Result<Self> {
        let builder = Self::builder(train_periods).config(config.clone());
        match labels {
            Some(labels) => builder.labels(labels).build(),
            None => builder.build(),
        }
    }

    /// Permanently remove folds that are degenerate against the construction labels
    fn drop_degenerate_folds(&mut self) -> Result<()> {
        let Some(labels) = self.labels.as_ref() else {
            return Ok(());
        };
        let present = present_rows(labels)?;

        let mut kept = Vec::with_capacity(self.period_folds.len());
        for fold in std::mem::take(&mut self.period_folds) {
            let rows = project(&fold, &self.all_periods);
            match assess(&rows, labels, &present)? {
                Some(defect) => {
                    self.n_splits -= 1;
                    self.diagnostics.push(Diagnostic::info(
                        Some(fold.fold_num),
                        format!("Dropping fold {} as {}", fold.fold_num, defect),
                    ));
                }
                None => kept.push(fold),
            }
        }

        self.period_folds = kept;
        Ok(())
    }

    /// Row-level folds over the construction dataset
    pub fn split(&self) -> Result<Vec<RowFold>> {
        self.split_on(&self.all_periods, None)
    }

    /// Re-project the folds onto another row dataset.
    ///
    /// With `drop_folds` enabled, folds that are degenerate against `labels`
    /// (or the construction labels when `None`) are skipped for this call only.
    pub fn split_on(&self, row_periods: &[P], labels: Option<&Series>) -> Result<Vec<RowFold>> {
        let labels = if self.drop_folds {
            labels.or(self.labels.as_ref())
        } else {
            None
        };

        let present = match labels {
            Some(labels) if labels.len() != row_periods.len() => {
                return Err(PanelSplitError::length_mismatch(
                    "labels",
                    row_periods.len(),
                    labels.len(),
                ));
            }
            Some(labels) => Some(present_rows(labels)?),
            None => None,
        };

        let mut folds = Vec::with_capacity(self.period_folds.len());
        for fold in &self.period_folds {
            let rows = project(fold, row_periods);
            if let (Some(labels), Some(present)) = (labels, present.as_deref()) {
                if let Some(defect) = assess(&rows, labels, present)? {
                    log::debug!("Skipping fold {} as {}", fold.fold_num, defect);
                    continue;
                }
            }
            folds.push(rows);
        }

        Ok(folds)
    }

    /// Fold count after construction-time drops
    pub fn split_count(&self) -> usize {
        self.n_splits
    }

    pub fn unique_periods(&self) -> &[P] {
        &self.unique_periods
    }

    pub fn period_folds(&self) -> &[PeriodFold<P>] {
        &self.period_folds
    }

    /// Row-aligned periods captured at construction
    pub fn periods(&self) -> &[P] {
        &self.all_periods
    }

    pub fn n_rows(&self) -> usize {
        self.all_periods.len()
    }

    pub fn drop_folds(&self) -> bool {
        self.drop_folds
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Text chart of the period folds
    pub fn render_chart(&self) -> String {
        render_chart(&self.unique_periods, &self.period_folds)
    }
}
