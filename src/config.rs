use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sieve_core::{Float, Label, Prior, Result, SieveError};

use crate::datasets::SPAM;

/// How the class prior is derived from the training labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriorKind {
    /// Equal probability for every class.
    #[default]
    Uniform,
    /// Class frequencies of the training set.
    Empirical,
}

impl PriorKind {
    pub fn build(self, labels: &[Label]) -> Prior {
        match self {
            PriorKind::Uniform => {
                let mut classes = labels.to_vec();
                classes.sort_unstable();
                classes.dedup();
                Prior::uniform(&classes)
            }
            PriorKind::Empirical => Prior::from_labels(labels),
        }
    }
}

/// Settings for one train/evaluate run.
///
/// Usually read from a TOML file, every field optional:
///
/// ```toml
/// train = "data/train.tsv"
/// test = "data/test.tsv"
/// output = "predictions.tsv"
/// cutoff = 2
/// prior = "empirical"
/// positive_class = 0
/// test_ratio = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub train: Option<PathBuf>,
    /// When absent, the training file is split with `test_ratio`.
    pub test: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Minimum corpus occurrences for a word to enter the vocabulary.
    pub cutoff: usize,
    pub prior: PriorKind,
    pub positive_class: Label,
    pub test_ratio: Float,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            train: None,
            test: None,
            output: None,
            cutoff: 1,
            prior: PriorKind::Uniform,
            positive_class: SPAM,
            test_ratio: 0.2,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SieveError::InvalidValue {
            message: format!("invalid config: {e}"),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// # Errors
    ///
    /// - [`SieveError::InvalidHyperparameter`] if `train` is missing, or if
    ///   no `test` file is set and `test_ratio` is outside `(0, 1)`
    pub fn validate(&self) -> Result<()> {
        if self.train.is_none() {
            return Err(SieveError::InvalidHyperparameter {
                name: "train".into(),
                value: "<missing>".into(),
            });
        }

        if self.test.is_none() && !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(SieveError::InvalidHyperparameter {
                name: "test_ratio".into(),
                value: self.test_ratio.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RunConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.cutoff, 1);
        assert_eq!(config.positive_class, SPAM);
    }

    #[test]
    fn test_config_from_toml() {
        let config = RunConfig::from_toml_str(
            r#"
            train = "train.tsv"
            cutoff = 3
            prior = "empirical"
            test_ratio = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.train, Some(PathBuf::from("train.tsv")));
        assert_eq!(config.cutoff, 3);
        assert_eq!(config.prior, PriorKind::Empirical);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_unknown_field() {
        let result = RunConfig::from_toml_str("smoothing = 1.0");
        assert!(matches!(result, Err(SieveError::InvalidValue { .. })));
    }

    #[test]
    fn test_config_validate() {
        let config = RunConfig::default();
        assert!(matches!(
            config.validate(),
            Err(SieveError::InvalidHyperparameter { .. })
        ));

        let config = RunConfig {
            train: Some("t.tsv".into()),
            test_ratio: 1.0,
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SieveError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_config_validate_ignores_ratio_with_test_file() {
        let config = RunConfig {
            train: Some("train.tsv".into()),
            test: Some("test.tsv".into()),
            test_ratio: 1.0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prior_kind_build() {
        let labels = [1, 0, 1, 1];
        assert_eq!(PriorKind::Uniform.build(&labels).get(0), Some(0.5));
        assert_eq!(PriorKind::Empirical.build(&labels).get(1), Some(0.75));
    }
}
