pub mod impute;
pub mod imputation;
pub mod models;
pub mod predict;
pub mod progress;
pub mod traits;

pub use impute::CrossValImputation;
pub use imputation::{FittedMeanImputer, MeanImputer};
pub use models::{FittedMeanRegressor, FittedMostFrequent, MeanRegressor, MostFrequentClassifier};
pub use predict::{default_prediction_column, CrossValData, CrossValPrediction};
pub use progress::{ChannelProgress, FoldProgress, LogProgress, ProgressMessage};
pub use traits::{Estimator, FittedEstimator, FittedImputer, Imputer};
