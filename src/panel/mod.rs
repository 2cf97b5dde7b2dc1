pub mod chart;
pub mod periods;
pub mod projector;
pub mod splitter;
pub mod summary;
pub mod validity;

pub use periods::{dates_from_series, labels_from_series, periods_from_series, unique_periods};
pub use splitter::{PanelSplit, PanelSplitBuilder, Period};
pub use summary::{FoldSummary, SplitSummary};
pub use validity::FoldDefect;
