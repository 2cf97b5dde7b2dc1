mod mean;
mod most_frequent;

pub use mean::{FittedMeanRegressor, MeanRegressor};
pub use most_frequent::{FittedMostFrequent, MostFrequentClassifier};
