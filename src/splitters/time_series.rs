use super::base::IntervalSelector;
use super::types::IndexFold;
use crate::config::SplitConfig;
use crate::error::{PanelSplitError, Result};

/// Expanding-window splitter with optional gap and bounded train window.
///
/// Test windows are laid out back to back at the end of the sequence; each
/// fold trains on everything before its test window (minus `gap` positions),
/// truncated to the last `max_train_size` positions when that is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesSplitter {
    n_splits: usize,
    gap: usize,
    test_size: Option<usize>,
    max_train_size: Option<usize>,
}

impl TimeSeriesSplitter {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            gap: 0,
            test_size: None,
            max_train_size: None,
        }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        Self {
            n_splits: config.n_splits,
            gap: config.gap,
            test_size: config.test_size,
            max_train_size: config.max_train_size,
        }
    }

    /// Set gap between the end of train and the start of test
    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Set a fixed test window length
    pub fn with_test_size(mut self, test_size: usize) -> Self {
        self.test_size = Some(test_size);
        self
    }

    /// Bound the train window to its most recent positions
    pub fn with_max_train_size(mut self, max_train_size: usize) -> Self {
        self.max_train_size = Some(max_train_size);
        self
    }

    fn train_window(&self, train_end: usize) -> Vec<usize> {
        let train_start = match self.max_train_size {
            Some(max) if max < train_end => train_end - max,
            _ => 0,
        };
        (train_start..train_end).collect()
    }
}

impl IntervalSelector for TimeSeriesSplitter {
    fn split(&self, n_items: usize) -> Result<Vec<IndexFold>> {
        if n_items == 0 {
            return Ok(Vec::new());
        }
        if self.n_splits < 2 {
            return Err(PanelSplitError::Configuration(format!(
                "n_splits must be at least 2, got {}",
                self.n_splits
            )));
        }

        let n_folds = self.n_splits + 1;
        if n_folds > n_items {
            return Err(PanelSplitError::Configuration(format!(
                "Cannot have number of folds={} greater than the number of periods={}",
                n_folds, n_items
            )));
        }

        let test_size = self.test_size.unwrap_or(n_items / n_folds);
        if test_size == 0 {
            return Err(PanelSplitError::Configuration(
                "test_size must be at least 1".to_string(),
            ));
        }

        let reserved = self.gap + self.n_splits * test_size;
        if n_items <= reserved {
            return Err(PanelSplitError::Configuration(format!(
                "Too many splits={} for number of periods={} with test_size={} and gap={}",
                self.n_splits, n_items, test_size, self.gap
            )));
        }

        let first_test_start = n_items - self.n_splits * test_size;
        let splits = (first_test_start..n_items)
            .step_by(test_size)
            .enumerate()
            .map(|(fold_num, test_start)| IndexFold {
                train: self.train_window(test_start - self.gap),
                test: (test_start..test_start + test_size).collect(),
                fold_num,
            })
            .collect();

        Ok(splits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanding_default_test_size() {
        let splits = TimeSeriesSplitter::new(5).split(6).unwrap();

        assert_eq!(splits.len(), 5);
        assert_eq!(splits[0].train, vec![0]);
        assert_eq!(splits[0].test, vec![1]);
        assert_eq!(splits[4].train, vec![0, 1, 2, 3, 4]);
        assert_eq!(splits[4].test, vec![5]);
    }

    #[test]
    fn test_gap_and_fixed_test_size() {
        let splitter = TimeSeriesSplitter::new(3).with_test_size(2).with_gap(2);
        let splits = splitter.split(12).unwrap();

        assert_eq!(splits.len(), 3);
        assert_eq!(splits[0].train, vec![0, 1, 2, 3]);
        assert_eq!(splits[0].test, vec![6, 7]);
        assert_eq!(splits[1].train, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(splits[1].test, vec![8, 9]);
        assert_eq!(splits[2].train, (0..8).collect::<Vec<_>>());
        assert_eq!(splits[2].test, vec![10, 11]);
    }

    #[test]
    fn test_max_train_size_rolls_window() {
        let splitter = TimeSeriesSplitter::new(3).with_max_train_size(2);
        let splits = splitter.split(8).unwrap();

        // test_size = 8 / 4 = 2, tests start at 2, 4, 6
        assert_eq!(splits[0].train, vec![0, 1]);
        assert_eq!(splits[1].train, vec![2, 3]);
        assert_eq!(splits[2].train, vec![4, 5]);
        assert_eq!(splits[2].test, vec![6, 7]);
    }

    #[test]
    fn test_empty_input_has_no_folds() {
        let splits = TimeSeriesSplitter::new(3).split(0).unwrap();
        assert!(splits.is_empty());
    }

    #[test]
    fn test_too_many_folds() {
        assert!(TimeSeriesSplitter::new(5).split(4).is_err());
        assert!(TimeSeriesSplitter::new(3).with_gap(3).split(6).is_err());
        assert!(TimeSeriesSplitter::new(1).split(10).is_err());
    }
}
