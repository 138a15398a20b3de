//! Weighted composite with the safety filter as a hard gate.

use ivr_traits::{Result, unit_clamp};

use crate::combiner::{Combiner, SubScores};
use crate::filter::FilterVerdict;
use crate::weights::WeightConfig;

/// Weighted-sum combiner.
///
/// Computes `w · scores` when the filter approved the ticker and exactly 0
/// otherwise, regardless of the sub-scores.
///
/// # Examples
///
/// ```rust,no_run
/// use ivr_combine::{Combiner, FilterVerdict, SubScores, WeightConfig, WeightedCombiner};
///
/// let combiner = WeightedCombiner::new(WeightConfig::new(1.0, 1.0, 0.0));
/// let scores = SubScores { valuation: 1.0, quality: 0.5, timing: 0.0 };
///
/// assert_eq!(combiner.combine(&scores, &FilterVerdict::Approved).unwrap(), 0.75);
/// assert_eq!(combiner.combine(&scores, &FilterVerdict::NonPositiveEps).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedCombiner {
    weights: WeightConfig,
}

impl WeightedCombiner {
    /// Create a combiner with the given weights.
    #[must_use]
    pub const fn new(weights: WeightConfig) -> Self {
        Self { weights }
    }

    /// The normalized weights.
    #[must_use]
    pub const fn weights(&self) -> &WeightConfig {
        &self.weights
    }
}

impl Combiner for WeightedCombiner {
    fn combine(&self, scores: &SubScores, verdict: &FilterVerdict) -> Result<f64> {
        if !verdict.passed() {
            return Ok(0.0);
        }

        let composite = self.weights.to_array().dot(&scores.to_array());
        if !composite.is_finite() {
            return Err(format!("Composite is not finite: {composite}").into());
        }

        Ok(unit_clamp(composite))
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn perfect() -> SubScores {
        SubScores {
            valuation: 1.0,
            quality: 1.0,
            timing: 1.0,
        }
    }

    #[test]
    fn test_weighted_sum() {
        let combiner = WeightedCombiner::default();
        let scores = SubScores {
            valuation: 0.5,
            quality: 0.8,
            timing: 0.2,
        };
        let ivr = combiner.combine(&scores, &FilterVerdict::Approved).unwrap();
        assert_relative_eq!(ivr, 0.6 * 0.5 + 0.3 * 0.8 + 0.1 * 0.2);
    }

    #[test]
    fn test_rejection_forces_zero() {
        let combiner = WeightedCombiner::default();
        for verdict in [
            FilterVerdict::NonPositiveEps,
            FilterVerdict::NonPositiveFreeCashFlow,
            FilterVerdict::LowInterestCoverage(1.0),
            FilterVerdict::LowMarginOfSafety(0.05),
        ] {
            assert_eq!(combiner.combine(&perfect(), &verdict).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_bounded_for_any_weights() {
        for (v, q, t) in [(1.0, 0.0, 0.0), (0.2, 0.2, 0.6), (3.0, 7.0, 11.0)] {
            let combiner = WeightedCombiner::new(WeightConfig::new(v, q, t));
            let ivr = combiner.combine(&perfect(), &FilterVerdict::Approved).unwrap();
            assert_relative_eq!(ivr, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_non_finite_scores_error() {
        let combiner = WeightedCombiner::default();
        let scores = SubScores {
            valuation: f64::NAN,
            quality: 0.5,
            timing: 0.5,
        };
        assert!(combiner.combine(&scores, &FilterVerdict::Approved).is_err());
    }
}
