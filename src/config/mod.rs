pub mod manager;
pub mod prediction;
pub mod split;
pub mod traits;

pub use manager::{ConfigManager, PanelConfig};
pub use prediction::{ImputationConfig, PredictionConfig, PredictionMethod};
pub use split::SplitConfig;
pub use traits::ConfigSection;
