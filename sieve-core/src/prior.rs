#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Float, Label, Result, SieveError};

/// Maximum allowed distance between the sum of a prior and `1.0`.
pub const PRIOR_TOLERANCE: Float = 1e-6;

/// Class probabilities assumed before any feature is observed.
///
/// A prior is only meaningful relative to a class set: [`validate`](Prior::validate)
/// checks that it covers exactly those classes and forms a probability
/// distribution. Construction itself does not validate, so a prior can be
/// built before the training labels are known.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prior(BTreeMap<Label, Float>);

impl Prior {
    pub fn new(probabilities: BTreeMap<Label, Float>) -> Self {
        Self(probabilities)
    }

    /// Equal mass on every class in `classes`.
    pub fn uniform(classes: &[Label]) -> Self {
        let p = 1.0 / classes.len() as Float;
        Self(classes.iter().map(|&c| (c, p)).collect())
    }

    /// Empirical class frequencies of `labels`.
    pub fn from_labels(labels: &[Label]) -> Self {
        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }

        let n = labels.len() as Float;
        Self(
            counts
                .into_iter()
                .map(|(c, count)| (c, count as Float / n))
                .collect(),
        )
    }

    pub fn get(&self, class: Label) -> Option<Float> {
        self.0.get(&class).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, Float)> + '_ {
        self.0.iter().map(|(&c, &p)| (c, p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that the prior is a distribution over exactly `classes`.
    ///
    /// `classes` must be sorted and free of duplicates.
    ///
    /// # Errors
    ///
    /// [`SieveError::InvalidPrior`] if a class is missing or extra, a value is
    /// outside `[0, 1]` (or not finite), or the values do not sum to `1.0`
    /// within [`PRIOR_TOLERANCE`].
    pub fn validate(&self, classes: &[Label]) -> Result<()> {
        let keys: Vec<Label> = self.0.keys().copied().collect();
        if keys != classes {
            return Err(SieveError::InvalidPrior {
                message: format!("prior covers classes {keys:?}, training labels are {classes:?}"),
            });
        }

        if let Some((class, p)) = self
            .iter()
            .find(|&(_, p)| !p.is_finite() || !(0.0..=1.0).contains(&p))
        {
            return Err(SieveError::InvalidPrior {
                message: format!("probability {p} for class {class} is outside [0, 1]"),
            });
        }

        let sum: Float = self.0.values().sum();
        if (sum - 1.0).abs() > PRIOR_TOLERANCE {
            return Err(SieveError::InvalidPrior {
                message: format!("probabilities sum to {sum}, expected 1"),
            });
        }

        Ok(())
    }
}

impl FromIterator<(Label, Float)> for Prior {
    fn from_iter<I: IntoIterator<Item = (Label, Float)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
