use super::{types::PanelMetadata, validator::PanelValidator};
use crate::error::{PanelSplitError, Result};
use polars::prelude::*;
use std::path::Path;

pub struct PanelLoader;

impl PanelLoader {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| PanelSplitError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load a panel CSV and check its period column
    pub fn load_and_validate<P: AsRef<Path>>(
        path: P,
        period_column: &str,
        min_rows: Option<usize>,
    ) -> Result<DataFrame> {
        let df = Self::load(&path)?;

        PanelValidator::validate_period_column(&df, period_column)?;
        PanelValidator::validate_minimum_rows(&df, min_rows.unwrap_or(1))?;

        // Warn about nulls but don't fail
        let null_report = PanelValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        Ok(df)
    }

    pub fn describe<P: AsRef<Path>>(
        path: P,
        df: &DataFrame,
        period_column: &str,
    ) -> Result<PanelMetadata> {
        let period = df.column(period_column)?;

        Ok(PanelMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_rows: df.height(),
            num_columns: df.width(),
            columns: df.get_column_names().iter().map(|s| s.to_string()).collect(),
            period_column: period_column.to_string(),
            period_dtype: format!("{:?}", period.dtype()),
            unique_periods: period.as_materialized_series().n_unique()?,
            null_report: PanelValidator::check_nulls(df),
        })
    }
}
