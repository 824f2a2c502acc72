use std::fmt;

use sieve_core::{Float, Label, Result, SieveError};

/// Binary confusion counts relative to one positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

/// Accuracy, precision, recall, specificity and F1 for a labelled run.
///
/// Every class other than `positive` counts as negative. Predictions that are
/// `None` (unclassified) enter no confusion cell but still count against
/// accuracy. A ratio with a zero denominator is reported as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationReport {
    positive: Label,
    counts: ConfusionCounts,
    unclassified: usize,
}

fn ratio(num: usize, den: usize) -> Float {
    if den == 0 {
        0.0
    } else {
        num as Float / den as Float
    }
}

impl ClassificationReport {
    /// # Errors
    ///
    /// - [`SieveError::ShapeMismatch`] if the slices differ in length
    /// - [`SieveError::EmptyInput`] if they are empty
    pub fn evaluate(y_true: &[Label], y_pred: &[Label], positive: Label) -> Result<Self> {
        let y_pred: Vec<Option<Label>> = y_pred.iter().copied().map(Some).collect();
        Self::evaluate_partial(y_true, &y_pred, positive)
    }

    /// Like [`evaluate`](ClassificationReport::evaluate), for batch output
    /// that may contain unclassified entries.
    pub fn evaluate_partial(
        y_true: &[Label],
        y_pred: &[Option<Label>],
        positive: Label,
    ) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(SieveError::ShapeMismatch {
                expected: format!("Expected {} predictions", y_true.len()),
                got: format!("Got {} predictions", y_pred.len()),
            });
        }
        if y_true.is_empty() {
            return Err(SieveError::EmptyInput);
        }

        let mut counts = ConfusionCounts::default();
        let mut unclassified = 0;

        for (&truth, &pred) in y_true.iter().zip(y_pred) {
            let Some(pred) = pred else {
                unclassified += 1;
                continue;
            };

            match (truth == positive, pred == positive) {
                (true, true) => counts.true_positive += 1,
                (false, true) => counts.false_positive += 1,
                (false, false) => counts.true_negative += 1,
                (true, false) => counts.false_negative += 1,
            }
        }

        Ok(Self {
            positive,
            counts,
            unclassified,
        })
    }

    pub fn positive(&self) -> Label {
        self.positive
    }

    pub fn counts(&self) -> ConfusionCounts {
        self.counts
    }

    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    pub fn total(&self) -> usize {
        let c = self.counts;
        c.true_positive + c.false_positive + c.true_negative + c.false_negative + self.unclassified
    }

    pub fn accuracy(&self) -> Float {
        ratio(
            self.counts.true_positive + self.counts.true_negative,
            self.total(),
        )
    }

    pub fn precision(&self) -> Float {
        ratio(
            self.counts.true_positive,
            self.counts.true_positive + self.counts.false_positive,
        )
    }

    /// Also known as sensitivity.
    pub fn recall(&self) -> Float {
        ratio(
            self.counts.true_positive,
            self.counts.true_positive + self.counts.false_negative,
        )
    }

    pub fn specificity(&self) -> Float {
        ratio(
            self.counts.true_negative,
            self.counts.true_negative + self.counts.false_positive,
        )
    }

    pub fn f1(&self) -> Float {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.counts;
        writeln!(f, "positive class: {}", self.positive)?;
        writeln!(
            f,
            "tp={} fp={} tn={} fn={} unclassified={}",
            c.true_positive, c.false_positive, c.true_negative, c.false_negative, self.unclassified
        )?;
        writeln!(f, "accuracy:    {:.4}", self.accuracy())?;
        writeln!(f, "precision:   {:.4}", self.precision())?;
        writeln!(f, "recall:      {:.4}", self.recall())?;
        writeln!(f, "specificity: {:.4}", self.specificity())?;
        write!(f, "f1:          {:.4}", self.f1())
    }
}
