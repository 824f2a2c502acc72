pub mod likelihood;
pub mod naive_bayes;

pub use likelihood::{FeatureValue, LikelihoodTable};
pub use naive_bayes::{BatchPrediction, NaiveBayes};
