mod mean;

pub use mean::{FittedMeanImputer, MeanImputer};
