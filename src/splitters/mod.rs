pub mod base;
pub mod time_series;
pub mod types;

pub use base::IntervalSelector;
pub use time_series::TimeSeriesSplitter;
pub use types::IndexFold;
