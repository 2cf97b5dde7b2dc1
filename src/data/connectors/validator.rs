use crate::error::{PanelSplitError, Result};
use polars::prelude::*;

pub struct PanelValidator;

impl PanelValidator {
    /// The period column must exist, hold an orderable type, and have no nulls
    pub fn validate_period_column(df: &DataFrame, period_column: &str) -> Result<()> {
        let column = df.column(period_column).map_err(|_| {
            PanelSplitError::DataLoading(format!("Missing period column: {}", period_column))
        })?;

        let dtype = column.dtype();
        if !(dtype.is_integer() || dtype.is_temporal() || matches!(dtype, DataType::String)) {
            return Err(PanelSplitError::DataLoading(format!(
                "Period column '{}' must be integer, temporal or string, found {:?}",
                period_column, dtype
            )));
        }

        let null_count = column.null_count();
        if null_count > 0 {
            return Err(PanelSplitError::DataLoading(format!(
                "Period column '{}' has {} null values",
                period_column, null_count
            )));
        }

        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(PanelSplitError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Columns that contain nulls, with their null counts
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|column| column.null_count() > 0)
            .map(|column| (column.name().to_string(), column.null_count()))
            .collect()
    }
}
