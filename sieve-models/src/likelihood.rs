#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use sieve_core::{Float, Label, Result, SieveError};

/// A feature value usable as an exact lookup key.
///
/// Floats are only safe as keys for discrete data (here: `0.0`/`1.0` word
/// presence), so values are canonicalised on the way in:
/// - `-0.0` is folded onto `0.0`
/// - `NaN` is rejected ([`FeatureValue::new`] returns `None`)
///
/// Equality uses `to_bits()` and ordering uses `total_cmp`, which agree on
/// every non-NaN value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct FeatureValue(Float);

impl FeatureValue {
    pub fn new(value: Float) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn get(self) -> Float {
        self.0
    }
}

impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FeatureValue {}

impl PartialOrd for FeatureValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FeatureValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Conditional probabilities `P(feature_i = v | class)` for a single feature.
///
/// Entries are kept sorted by value and searched with a binary search; each
/// entry holds one probability per class, indexed by the class's *position* in
/// the model's sorted class list (not by the class id itself).
///
/// A table is built once during fitting and never mutated afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodTable {
    entries: Vec<(FeatureValue, Vec<Float>)>,
}

impl LikelihoodTable {
    /// Estimates the table for one feature column by frequency counting.
    ///
    /// # Parameters
    ///
    /// - `feature`: Index of the column (used in error messages).
    /// - `column`: Value of this feature for every training sample.
    /// - `class_index`: Position of each sample's label in `classes`.
    /// - `classes`: Sorted distinct class labels.
    /// - `class_counts`: Number of training samples per class position.
    ///
    /// # Errors
    ///
    /// - [`SieveError::InvalidValue`] if the column contains `NaN`.
    /// - [`SieveError::EmptyClass`] if any class has zero samples.
    pub fn estimate(
        feature: usize,
        column: &[Float],
        class_index: &[usize],
        classes: &[Label],
        class_counts: &[usize],
    ) -> Result<Self> {
        if let Some(pos) = class_counts.iter().position(|&n| n == 0) {
            return Err(SieveError::EmptyClass {
                class: classes[pos],
            });
        }

        let mut counts: BTreeMap<FeatureValue, Vec<usize>> = BTreeMap::new();

        for (&raw, &c) in column.iter().zip(class_index) {
            let value = FeatureValue::new(raw).ok_or_else(|| SieveError::InvalidValue {
                message: format!("NaN encountered in feature {feature}"),
            })?;

            counts.entry(value).or_insert_with(|| vec![0; classes.len()])[c] += 1;
        }

        let entries = counts
            .into_iter()
            .map(|(value, per_class)| {
                let probabilities = per_class
                    .iter()
                    .zip(class_counts)
                    .map(|(&hits, &total)| hits as Float / total as Float)
                    .collect();
                (value, probabilities)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Per-class probabilities for `value`, or `None` if it was never observed.
    pub fn probabilities(&self, value: Float) -> Option<&[Float]> {
        let key = FeatureValue::new(value)?;
        self.entries
            .binary_search_by(|(v, _)| v.cmp(&key))
            .ok()
            .map(|i| self.entries[i].1.as_slice())
    }

    /// `P(feature = value | class at position class_idx)`.
    pub fn get(&self, value: Float, class_idx: usize) -> Option<Float> {
        self.probabilities(value)
            .and_then(|p| p.get(class_idx).copied())
    }

    /// Observed values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = Float> + '_ {
        self.entries.iter().map(|(v, _)| v.get())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_value_canonicalises_zero() {
        assert_eq!(FeatureValue::new(-0.0), FeatureValue::new(0.0));
        assert!(FeatureValue::new(Float::NAN).is_none());
        assert!(FeatureValue::new(0.0) < FeatureValue::new(1.0));
    }

    #[test]
    fn test_estimate_frequencies() {
        // samples: (1, c0) (1, c0) (0, c1) (1, c1)
        let column = [1.0, 1.0, 0.0, 1.0];
        let class_index = [0, 0, 1, 1];
        let table = LikelihoodTable::estimate(0, &column, &class_index, &[0, 1], &[2, 2]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.probabilities(1.0), Some(&[1.0, 0.5][..]));
        assert_eq!(table.get(0.0, 0), Some(0.0));
        assert_eq!(table.get(0.0, 1), Some(0.5));
        assert_eq!(table.values().collect::<Vec<_>>(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_probabilities_per_class_sum_to_one() {
        let column = [0.0, 1.0, 2.0, 1.0, 0.0, 2.0, 2.0];
        let class_index = [0, 0, 0, 1, 1, 1, 1];
        let table = LikelihoodTable::estimate(3, &column, &class_index, &[4, 9], &[3, 4]).unwrap();

        for c in 0..2 {
            let total: Float = table.values().filter_map(|v| table.get(v, c)).sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unseen_value_is_none() {
        let table = LikelihoodTable::estimate(0, &[1.0, 0.0], &[0, 1], &[0, 1], &[1, 1]).unwrap();
        assert!(table.probabilities(2.0).is_none());
        assert!(table.probabilities(Float::NAN).is_none());
        assert_eq!(table.get(-0.0, 1), Some(1.0));
    }

    #[test]
    fn test_estimate_rejects_nan() {
        let result = LikelihoodTable::estimate(5, &[Float::NAN], &[0], &[0], &[1]);
        assert!(matches!(result, Err(SieveError::InvalidValue { .. })));
    }

    #[test]
    fn test_estimate_rejects_empty_class() {
        let result = LikelihoodTable::estimate(0, &[1.0], &[0], &[0, 7], &[1, 0]);
        assert!(matches!(result, Err(SieveError::EmptyClass { class: 7 })));
    }
}
