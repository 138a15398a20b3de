//! Core trait definition for composite combiners.

use ivr_traits::Result;
use ndarray::{Array1, array};
use serde::{Deserialize, Serialize};

use crate::filter::FilterVerdict;

/// The three IVR sub-scores for one ticker, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    /// Valuation sub-score
    pub valuation: f64,

    /// Quality sub-score
    pub quality: f64,

    /// Timing sub-score
    pub timing: f64,
}

impl SubScores {
    /// Sub-scores in the order valuation, quality, timing.
    #[must_use]
    pub fn to_array(&self) -> Array1<f64> {
        array![self.valuation, self.quality, self.timing]
    }
}

/// Combines sub-scores into the composite IVR.
///
/// Implementations must return exactly 0 whenever the verdict is a
/// rejection.
///
/// # Examples
///
/// ```rust,no_run
/// use ivr_combine::{Combiner, FilterVerdict, SubScores};
///
/// struct ValuationOnly;
///
/// impl Combiner for ValuationOnly {
///     fn combine(&self, scores: &SubScores, verdict: &FilterVerdict) -> ivr_traits::Result<f64> {
///         Ok(if verdict.passed() { scores.valuation } else { 0.0 })
///     }
///
///     fn name(&self) -> &str {
///         "valuation_only"
///     }
/// }
/// ```
pub trait Combiner: Send + Sync {
    /// Composite score for one ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the combination produces a non-finite value.
    fn combine(&self, scores: &SubScores, verdict: &FilterVerdict) -> Result<f64>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}
