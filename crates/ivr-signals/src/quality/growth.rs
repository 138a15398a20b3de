//! Growth quality signal.

use ivr_traits::{RawFinancials, Signal, unit_clamp};
use serde::{Deserialize, Serialize};

/// Configuration for the growth signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Blended growth rate that earns a full score (default: 0.15)
    pub optimal_cagr: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self { optimal_cagr: 0.15 }
    }
}

/// Growth signal.
///
/// Averages revenue and earnings growth (each 0 when unreported) into an
/// estimated CAGR. Non-positive estimates score 0; otherwise the score is
/// `cagr / optimal_cagr` capped at 1.
///
/// # Example
///
/// ```ignore
/// use ivr_signals::quality::{Growth, GrowthConfig};
///
/// let signal = Growth::new(GrowthConfig { optimal_cagr: 0.20 });
/// ```
#[derive(Debug, Clone)]
pub struct Growth {
    config: GrowthConfig,
}

impl Growth {
    /// Create a new growth signal with the given configuration.
    #[must_use]
    pub const fn new(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Mean of revenue and earnings growth.
    #[must_use]
    pub fn estimated_cagr(data: &RawFinancials) -> f64 {
        let revenue = data.revenue_growth.unwrap_or(0.0);
        let earnings = data.earnings_growth.unwrap_or(0.0);
        (revenue + earnings) / 2.0
    }
}

impl Default for Growth {
    fn default() -> Self {
        Self::new(GrowthConfig::default())
    }
}

impl Signal for Growth {
    fn name(&self) -> &str {
        "growth"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        let cagr = Self::estimated_cagr(data);
        if cagr <= 0.0 || self.config.optimal_cagr <= 0.0 {
            return 0.0;
        }
        unit_clamp(cagr / self.config.optimal_cagr)
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> &[&str] {
        &["revenue_growth", "earnings_growth"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ivr_traits::PriceHistory;

    fn with_growth(revenue: Option<f64>, earnings: Option<f64>) -> RawFinancials {
        RawFinancials {
            revenue_growth: revenue,
            earnings_growth: earnings,
            ..RawFinancials::new("TEST", PriceHistory::new(vec![20.0]))
        }
    }

    #[test]
    fn test_growth_linear_below_target() {
        let signal = Growth::default();
        let data = with_growth(Some(0.10), Some(0.05));
        assert_relative_eq!(Growth::estimated_cagr(&data), 0.075);
        assert_relative_eq!(signal.score(&data), 0.5);
    }

    #[test]
    fn test_growth_capped() {
        let signal = Growth::default();
        assert_relative_eq!(signal.score(&with_growth(Some(0.40), Some(0.30))), 1.0);
    }

    #[test]
    fn test_growth_missing_counts_as_zero() {
        let signal = Growth::default();
        assert_relative_eq!(signal.score(&with_growth(None, None)), 0.0);
        assert_relative_eq!(signal.score(&with_growth(Some(0.15), None)), 0.5);
    }

    #[test]
    fn test_negative_growth_scores_zero() {
        let signal = Growth::default();
        assert_relative_eq!(signal.score(&with_growth(Some(0.20), Some(-0.30))), 0.0);
    }
}
