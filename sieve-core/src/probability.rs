use crate::Float;

/// Computes the **log-odds evidence** contributed by a per-feature posterior.
///
/// Naive Bayes treats each feature as an independent piece of evidence. In
/// log-odds space those pieces are combined by simple addition, and the sum is
/// mapped back to a probability with [`logistic`].
///
/// # Definition
///
/// For a posterior `p` the contribution is:
///
/// ```text
/// e(p) = ln(1 − p) − ln(p)
/// ```
///
/// - `e(p) < 0` when `p > 0.5` (evidence *for* the class)
/// - `e(p) > 0` when `p < 0.5` (evidence *against* the class)
/// - `e(0.5) = 0` (uninformative)
///
/// # Numerical notes
///
/// `e(0) = +∞` and `e(1) = −∞` exactly. Adding both gives `NaN`, so sums
/// should go through [`Evidence`], which keeps the infinite cases apart.
///
/// # Examples
///
/// ```rust
/// use sieve_core::probability::log_odds_evidence;
///
/// assert!(log_odds_evidence(0.5).abs() < 1e-12);
/// assert!(log_odds_evidence(0.9) < 0.0);
/// assert_eq!(log_odds_evidence(0.0), f64::INFINITY);
/// ```
pub fn log_odds_evidence(p: Float) -> Float {
    (1.0 - p).ln() - p.ln()
}

/// Maps an accumulated evidence sum `s` back to a probability.
///
/// ```text
/// posterior = 1 / (1 + e^s)
/// ```
///
/// The result always lies in `[0, 1]`: a large positive `s` overflows `e^s` to
/// `∞` and yields `0.0`, a large negative `s` yields `1.0`.
pub fn logistic(s: Float) -> Float {
    1.0 / (1.0 + s.exp())
}

/// Running log-odds sum for one class.
///
/// Finite contributions are summed. A per-feature posterior of exactly `0`
/// (`+∞` evidence) makes the class impossible and one of exactly `1` (`−∞`)
/// makes it certain. When both occur, impossibility wins: the class never
/// produced one of the observed values, so its posterior is `0`.
///
/// ```rust
/// use sieve_core::probability::Evidence;
///
/// let mut e = Evidence::default();
/// e.add(0.9);
/// e.add(0.0);
/// assert_eq!(e.posterior(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evidence {
    sum: Float,
    impossible: bool,
    certain: bool,
}

impl Evidence {
    /// Adds the evidence of one per-feature posterior `p`.
    pub fn add(&mut self, p: Float) {
        if p <= 0.0 {
            self.impossible = true;
        } else if p >= 1.0 {
            self.certain = true;
        } else {
            self.sum += log_odds_evidence(p);
        }
    }

    /// Finite part of the sum, ignoring the `±∞` contributions.
    pub fn finite_sum(&self) -> Float {
        self.sum
    }

    pub fn posterior(&self) -> Float {
        if self.impossible {
            0.0
        } else if self.certain {
            1.0
        } else {
            logistic(self.sum)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_is_antisymmetric() {
        let a = log_odds_evidence(0.2);
        let b = log_odds_evidence(0.8);
        assert!((a + b).abs() < 1e-12);
        assert!(a > 0.0);
    }

    #[test]
    fn test_evidence_extremes_are_infinite() {
        assert_eq!(log_odds_evidence(0.0), Float::INFINITY);
        assert_eq!(log_odds_evidence(1.0), Float::NEG_INFINITY);
    }

    #[test]
    fn test_logistic_inverts_evidence() {
        for &p in &[0.1, 0.25, 0.5, 0.75, 0.9] {
            let back = logistic(log_odds_evidence(p));
            assert!((back - p).abs() < 1e-9);
        }
    }

    #[test]
    fn test_logistic_saturates_in_unit_interval() {
        assert_eq!(logistic(1e6), 0.0);
        assert_eq!(logistic(-1e6), 1.0);
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
        assert_eq!(logistic(Float::INFINITY), 0.0);
    }

    #[test]
    fn test_accumulator_zero_outweighs_any_finite_sum() {
        let mut e = Evidence::default();
        for _ in 0..50 {
            e.add(0.999);
        }
        assert!(e.posterior() > 0.999);

        e.add(0.0);
        assert_eq!(e.posterior(), 0.0);
    }

    #[test]
    fn test_accumulator_certain_and_conflict() {
        let mut e = Evidence::default();
        e.add(0.01);
        e.add(1.0);
        assert_eq!(e.posterior(), 1.0);

        e.add(0.0);
        assert_eq!(e.posterior(), 0.0);
        assert!(!e.finite_sum().is_nan());
    }

    #[test]
    fn test_accumulator_empty_is_uninformative() {
        assert_eq!(Evidence::default().posterior(), 0.5);
    }
}
