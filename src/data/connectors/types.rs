use serde::{Deserialize, Serialize};

/// Metadata about a loaded panel CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMetadata {
    pub file_path: String,
    pub num_rows: usize,
    pub num_columns: usize,
    pub columns: Vec<String>,
    pub period_column: String,
    pub period_dtype: String,
    pub unique_periods: usize,
    pub null_report: Vec<(String, usize)>,
}
