use crate::types::{PeriodFold, RowFold};
use std::collections::HashSet;
use std::hash::Hash;

/// Project a period-level fold onto rows by period membership
pub fn project<P: Hash + Eq>(fold: &PeriodFold<P>, row_periods: &[P]) -> RowFold {
    let train: HashSet<&P> = fold.train.iter().collect();
    let test: HashSet<&P> = fold.test.iter().collect();

    RowFold {
        train: row_periods.iter().map(|p| train.contains(p)).collect(),
        test: row_periods.iter().map(|p| test.contains(p)).collect(),
        fold_num: fold.fold_num,
    }
}
