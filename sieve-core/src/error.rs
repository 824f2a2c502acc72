use thiserror::Error;

use crate::{Float, Label};

#[derive(Debug, Error)]
pub enum SieveError {
    /// IO-related failures (file not found, unreadable, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a `label\ttext` dataset
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A collection that must contain at least one element was empty.
    #[error("empty input")]
    EmptyInput,

    /// Vectors of a single collection differ in length
    #[error("inconsistent shape: expected {expected}, got {got}")]
    InconsistentShape { expected: usize, got: usize },

    /// Row or column index outside `0..len`
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Shape or dimensionality mismatch between two inputs
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Prior does not cover the class set or is not a distribution
    #[error("invalid prior: {message}")]
    InvalidPrior { message: String },

    /// A class has no training samples.
    #[error("class {class} has no training samples")]
    EmptyClass { class: Label },

    /// The Bayes normalisation term summed to zero for an observed value.
    #[error("degenerate normalization for feature {feature} (value {value})")]
    DegenerateNormalization { feature: usize, value: Float },

    /// Model used before calling `fit`
    #[error("model is not fitted")]
    NotFitted,

    /// Invalid hyperparameter or configuration
    #[error("invalid hyperparameter {name} = {value}")]
    InvalidHyperparameter { name: String, value: String },

    /// Invalid value
    #[error("invalid value: {message}")]
    InvalidValue { message: String },
}

pub type Result<T> = std::result::Result<T, SieveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = SieveError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for length 3");

        let err = SieveError::InvalidPrior {
            message: "sum is 0.9".into(),
        };
        assert!(err.to_string().contains("sum is 0.9"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(open(), Err(SieveError::Io(_))));
    }
}
