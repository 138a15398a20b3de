//! Sub-score weights.

use ndarray::{Array1, array};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Weights for the valuation, quality and timing sub-scores.
///
/// Always normalized: every weight is finite and non-negative and the three
/// sum to 1. Inputs that cannot be normalized (all zero, any negative or
/// non-finite weight) fall back to the default 0.60 / 0.30 / 0.10 split.
/// Deserialization goes through the same normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWeights")]
pub struct WeightConfig {
    valuation: f64,
    quality: f64,
    timing: f64,
}

#[derive(Deserialize)]
struct RawWeights {
    valuation: f64,
    quality: f64,
    timing: f64,
}

impl From<RawWeights> for WeightConfig {
    fn from(raw: RawWeights) -> Self {
        Self::new(raw.valuation, raw.quality, raw.timing)
    }
}

impl WeightConfig {
    /// Default valuation weight.
    pub const DEFAULT_VALUATION: f64 = 0.60;
    /// Default quality weight.
    pub const DEFAULT_QUALITY: f64 = 0.30;
    /// Default timing weight.
    pub const DEFAULT_TIMING: f64 = 0.10;

    /// Normalizes raw weights so they sum to 1.
    #[must_use]
    pub fn new(valuation: f64, quality: f64, timing: f64) -> Self {
        let raw = [valuation, quality, timing];
        let usable = raw.iter().all(|w| w.is_finite() && *w >= 0.0);
        let total: f64 = raw.iter().sum();

        if !usable || total <= 0.0 {
            warn!(
                valuation,
                quality, timing, "Unusable IVR weights, falling back to defaults"
            );
            return Self::default();
        }

        Self {
            valuation: valuation / total,
            quality: quality / total,
            timing: timing / total,
        }
    }

    /// Normalized valuation weight.
    pub const fn valuation(&self) -> f64 {
        self.valuation
    }

    /// Normalized quality weight.
    pub const fn quality(&self) -> f64 {
        self.quality
    }

    /// Normalized timing weight.
    pub const fn timing(&self) -> f64 {
        self.timing
    }

    /// Weights in the order valuation, quality, timing.
    #[must_use]
    pub fn to_array(&self) -> Array1<f64> {
        array![self.valuation, self.quality, self.timing]
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            valuation: Self::DEFAULT_VALUATION,
            quality: Self::DEFAULT_QUALITY,
            timing: Self::DEFAULT_TIMING,
        }
    }
}
