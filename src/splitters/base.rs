use super::types::IndexFold;
use crate::error::Result;

/// Time-ordered splitter over `n_items` ordered positions.
///
/// Implementations return folds in increasing time order, with every train
/// window ending before its test window.
pub trait IntervalSelector: Send + Sync {
    /// Split positions `0..n_items` into train/test folds
    fn split(&self, n_items: usize) -> Result<Vec<IndexFold>>;
}
