#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sieve_core::{
    Evidence, FeatureMatrix, FeatureVector, Float, Label, Predictions, Prior, Result, SieveError,
};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::likelihood::LikelihoodTable;

/// Everything learned by a successful [`NaiveBayes::fit`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
struct FittedState {
    /// One table per feature index.
    likelihood: Vec<LikelihoodTable>,
    prior: Prior,
    /// Sorted distinct training labels.
    classes: Vec<Label>,
    /// `prior[classes[k]]`, indexed by class position.
    class_prior: Vec<Float>,
}

impl FittedState {
    fn feature_vector_length(&self) -> usize {
        self.likelihood.len()
    }

    /// Posterior per class position.
    fn posteriors(&self, x: &FeatureVector) -> Result<Vec<Float>> {
        if x.len() != self.feature_vector_length() {
            return Err(SieveError::ShapeMismatch {
                expected: format!("Expected {} features", self.feature_vector_length()),
                got: format!("Got {} features", x.len()),
            });
        }

        let mut evidence = vec![Evidence::default(); self.classes.len()];

        for (i, (table, &value)) in self.likelihood.iter().zip(x.as_slice()).enumerate() {
            // Values never seen in training carry no evidence for any class.
            let Some(likelihoods) = table.probabilities(value) else {
                continue;
            };

            let z: Float = likelihoods
                .iter()
                .zip(&self.class_prior)
                .map(|(l, p)| l * p)
                .sum();

            if z <= 0.0 {
                return Err(SieveError::DegenerateNormalization { feature: i, value });
            }

            for ((acc, l), p) in evidence.iter_mut().zip(likelihoods).zip(&self.class_prior) {
                acc.add(l * p / z);
            }
        }

        Ok(evidence.iter().map(Evidence::posterior).collect())
    }

    fn predict(&self, x: &FeatureVector) -> Result<Label> {
        let posteriors = self.posteriors(x)?;

        // Strict `>` keeps the first (lowest) class id on ties.
        let mut best = 0;
        for (k, &p) in posteriors.iter().enumerate().skip(1) {
            if p > posteriors[best] {
                best = k;
            }
        }

        Ok(self.classes[best])
    }
}

/// Outcome of one vector in [`NaiveBayes::predict_batch`].
#[derive(Debug)]
pub enum BatchPrediction {
    Classified(Label),
    /// The vector had the wrong number of features.
    Unclassified,
    /// Prediction failed for this vector only, e.g. on a zero normalisation term.
    Failed(SieveError),
}

impl BatchPrediction {
    /// The predicted label, if any.
    pub fn label(&self) -> Option<Label> {
        match self {
            Self::Classified(label) => Some(*label),
            Self::Unclassified | Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// **Categorical Naive Bayes** classifier over discrete feature values.
///
/// Each feature is modelled independently given the class. Training estimates,
/// for every feature `i`, observed value `v` and class `c`:
///
/// ```text
/// P(x_i = v | c) = count(x_i = v ∧ y = c) / count(y = c)
/// ```
///
/// No additive smoothing is applied.
///
/// # Prediction
///
/// For a query `x` and each class `c`, every feature whose value was observed
/// during training contributes one piece of log-odds evidence:
///
/// ```text
/// Z   = Σ_c' P(x_i | c') · prior(c')
/// p   = P(x_i | c) · prior(c) / Z
/// S_c = Σ_i ln(1 − p) − ln(p)
/// posterior(c) = 1 / (1 + e^{S_c})
/// ```
///
/// A per-feature `p = 0` is infinite evidence against `c` and forces its
/// posterior to `0`; `p = 1` forces it to `1` unless some other feature has
/// `p = 0`, in which case `0` wins.
///
/// The predicted label is the class with the largest posterior; ties go to the
/// lowest class id. Feature values not seen during training are skipped.
/// Posteriors are each in `[0, 1]` but are not normalised across classes.
///
/// # Fitting and state
///
/// All learned state is built locally and installed only when fitting
/// succeeds, so a failed [`fit`](NaiveBayes::fit) leaves the model exactly as
/// it was. Re-fitting replaces the state entirely.
///
/// # Errors
///
/// - [`SieveError::ShapeMismatch`] if the label count differs from the sample
///   count, or a query has the wrong number of features
/// - [`SieveError::InvalidPrior`] if the prior is not a distribution over the
///   training classes
/// - [`SieveError::EmptyClass`] if a class has no samples
/// - [`SieveError::InvalidValue`] if `NaN` appears in training features
/// - [`SieveError::DegenerateNormalization`] if `Z = 0` for an observed value
/// - [`SieveError::NotFitted`] if prediction is called before fitting
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct NaiveBayes {
    state: Option<FittedState>,
}

impl NaiveBayes {
    /// Creates a new, unfitted model.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<&FittedState> {
        self.state.as_ref().ok_or(SieveError::NotFitted)
    }

    /// Fits the likelihood tables on training data.
    ///
    /// # Parameters
    ///
    /// - `x`: Feature matrix of shape `(n_samples, n_features)`
    /// - `y`: Labels of length `n_samples`
    /// - `prior`: Class prior; must cover exactly the distinct labels of `y`
    ///
    /// The prior is validated before any counting takes place.
    ///
    /// # Complexity
    ///
    /// Let `n = n_samples`, `d = n_features`, `u` = distinct values per feature.
    /// - Time: `O(n d log u)`
    /// - Space: `O(d u k)` for `k` classes
    pub fn fit(&mut self, x: &FeatureMatrix, y: &[Label], prior: &Prior) -> Result<()> {
        let n = x.row_count();
        let d = x.column_count();

        if y.len() != n {
            return Err(SieveError::ShapeMismatch {
                expected: format!("Expected {} labels", n),
                got: format!("Got {} labels", y.len()),
            });
        }

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        prior.validate(&classes)?;

        let mut class_counts = vec![0usize; classes.len()];
        let mut class_index = Vec::with_capacity(n);
        for label in y {
            let k = classes
                .binary_search(label)
                .map_err(|_| SieveError::InvalidValue {
                    message: format!("label {label} missing from class set"),
                })?;
            class_counts[k] += 1;
            class_index.push(k);
        }

        debug!(?classes, ?class_counts, "counted training classes");

        let likelihood = (0..d)
            .map(|i| {
                let column = x.column(i)?;
                LikelihoodTable::estimate(i, &column, &class_index, &classes, &class_counts)
            })
            .collect::<Result<Vec<_>>>()?;

        let class_prior = classes
            .iter()
            .map(|&c| prior.get(c).unwrap_or(0.0))
            .collect();

        info!(
            samples = n,
            features = d,
            classes = classes.len(),
            "fitted naive bayes model"
        );

        self.state = Some(FittedState {
            likelihood,
            prior: prior.clone(),
            classes,
            class_prior,
        });

        Ok(())
    }

    /// Predicts the class of a single feature vector.
    ///
    /// # Errors
    ///
    /// - [`SieveError::NotFitted`] if the model has not been trained
    /// - [`SieveError::ShapeMismatch`] if `x.len()` differs from the training width
    /// - [`SieveError::DegenerateNormalization`] on a zero normalisation term
    pub fn predict(&self, x: &FeatureVector) -> Result<Label> {
        self.state()?.predict(x)
    }

    /// Returns `(class, posterior)` for every class, in ascending class order.
    ///
    /// Each posterior lies in `[0, 1]`; they need not sum to one.
    pub fn posteriors(&self, x: &FeatureVector) -> Result<Vec<(Label, Float)>> {
        let state = self.state()?;
        let posteriors = state.posteriors(x)?;
        Ok(state.classes.iter().copied().zip(posteriors).collect())
    }

    /// Predicts every vector independently.
    ///
    /// A vector whose length differs from the training width is
    /// [`Unclassified`](BatchPrediction::Unclassified), and a vector whose
    /// prediction fails is [`Failed`](BatchPrediction::Failed); neither affects
    /// the other entries. Output order matches input order.
    ///
    /// # Errors
    ///
    /// - [`SieveError::NotFitted`] if the model has not been trained
    pub fn predict_batch(&self, xs: &[FeatureVector]) -> Result<Vec<BatchPrediction>> {
        let state = self.state()?;
        let width = state.feature_vector_length();

        let classify = |x: &FeatureVector| -> BatchPrediction {
            if x.len() != width {
                return BatchPrediction::Unclassified;
            }
            match state.predict(x) {
                Ok(label) => BatchPrediction::Classified(label),
                Err(e) => BatchPrediction::Failed(e),
            }
        };

        #[cfg(feature = "parallel")]
        let predictions: Vec<BatchPrediction> = xs.par_iter().map(classify).collect();

        #[cfg(not(feature = "parallel"))]
        let predictions: Vec<BatchPrediction> = xs.iter().map(classify).collect();

        let unclassified = predictions
            .iter()
            .filter(|p| matches!(p, BatchPrediction::Unclassified))
            .count();
        if unclassified > 0 {
            warn!(
                unclassified,
                expected_features = width,
                "batch contained vectors of the wrong length"
            );
        }

        let failed = predictions.iter().filter(|p| p.is_failed()).count();
        if failed > 0 {
            warn!(failed, "batch predictions failed");
        }

        Ok(predictions)
    }

    /// Predicts every row of `x`.
    ///
    /// Unlike [`predict_batch`](NaiveBayes::predict_batch), the width is
    /// checked once for the whole matrix.
    pub fn predict_matrix(&self, x: &FeatureMatrix) -> Result<Predictions> {
        let state = self.state()?;

        if x.column_count() != state.feature_vector_length() {
            return Err(SieveError::ShapeMismatch {
                expected: format!("Expected {} features", state.feature_vector_length()),
                got: format!("Got {} features", x.column_count()),
            });
        }

        let rows: Vec<FeatureVector> = x.rows().collect();

        #[cfg(feature = "parallel")]
        let predictions: Predictions = rows
            .par_iter()
            .map(|row| state.predict(row))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let predictions: Predictions = rows
            .iter()
            .map(|row| state.predict(row))
            .collect::<Result<_>>()?;

        Ok(predictions)
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Sorted distinct training labels, or `None` if not fitted.
    pub fn classes(&self) -> Option<&[Label]> {
        self.state.as_ref().map(|s| s.classes.as_slice())
    }

    pub fn prior(&self) -> Option<&Prior> {
        self.state.as_ref().map(|s| &s.prior)
    }

    /// Number of features the model was trained on, or `None` if not fitted.
    pub fn feature_vector_length(&self) -> Option<usize> {
        self.state.as_ref().map(FittedState::feature_vector_length)
    }

    /// The likelihood table of feature `i`.
    pub fn likelihood(&self, i: usize) -> Option<&LikelihoodTable> {
        self.state.as_ref().and_then(|s| s.likelihood.get(i))
    }
}
