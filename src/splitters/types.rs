use serde::{Deserialize, Serialize};

/// Train/test positions of a single fold over an ordered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
    pub fold_num: usize,
}

impl IndexFold {
    /// Largest position referenced by this fold, if any
    pub fn max_position(&self) -> Option<usize> {
        self.train.iter().chain(self.test.iter()).copied().max()
    }
}
