use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelSplitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Length mismatch for {what}: expected {expected} rows, got {actual}")]
    LengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Estimator error: {0}")]
    Estimator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PanelSplitError>;

impl PanelSplitError {
    pub(crate) fn length_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            what: what.to_string(),
            expected,
            actual,
        }
    }
}
