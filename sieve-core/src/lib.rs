pub mod error;
pub mod feature;
pub mod prior;
pub mod probability;
pub mod types;

pub use types::{Float, Label, Matrix, Predictions, Vector};

pub use error::{Result, SieveError};

pub use feature::{FeatureMatrix, FeatureVector};
pub use prior::{Prior, PRIOR_TOLERANCE};
pub use probability::{log_odds_evidence, logistic, Evidence};
