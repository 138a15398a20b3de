//! Hard safety gates applied before the composite is computed.

use std::fmt;

use ivr_traits::RawFinancials;
use serde::{Deserialize, Serialize};

/// Configuration for the safety filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyFilterConfig {
    /// Minimum |EBITDA / interest expense| (default: 2.0)
    pub min_interest_coverage: f64,

    /// Minimum margin of safety as a fraction (default: 0.20)
    pub min_margin_of_safety: f64,
}

impl Default for SafetyFilterConfig {
    fn default() -> Self {
        Self {
            min_interest_coverage: 2.0,
            min_margin_of_safety: 0.20,
        }
    }
}

/// Outcome of the safety filter.
///
/// The `Display` form is the human-readable reason stored with each result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterVerdict {
    /// All gates passed.
    Approved,
    /// Trailing EPS missing, zero or negative.
    NonPositiveEps,
    /// Free cash flow missing, zero or negative.
    NonPositiveFreeCashFlow,
    /// Interest coverage below the minimum; holds the computed coverage.
    LowInterestCoverage(f64),
    /// Margin of safety below the minimum; holds the margin as a fraction.
    LowMarginOfSafety(f64),
}

impl FilterVerdict {
    /// Whether the ticker may receive a non-zero IVR.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for FilterVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => f.write_str("Approved"),
            Self::NonPositiveEps => f.write_str("EPS negative or zero"),
            Self::NonPositiveFreeCashFlow => f.write_str("Free Cash Flow negative or zero"),
            Self::LowInterestCoverage(coverage) => {
                write!(f, "Interest coverage too low: {coverage:.2}")
            }
            Self::LowMarginOfSafety(margin) => {
                write!(f, "Margin of safety too low: {:.1}%", margin * 100.0)
            }
        }
    }
}

/// Ordered, short-circuiting safety gates.
///
/// Checks run in a fixed order and the first failure decides the verdict:
/// 1. Trailing EPS > 0
/// 2. Free cash flow > 0
/// 3. |EBITDA / interest expense| >= minimum, only when interest expense is
///    reported and non-zero (a missing EBITDA counts as 0)
/// 4. Margin of safety >= minimum
#[derive(Debug, Clone, Default)]
pub struct SafetyFilter {
    config: SafetyFilterConfig,
}

impl SafetyFilter {
    /// Create a new filter with the given configuration.
    #[must_use]
    pub const fn new(config: SafetyFilterConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SafetyFilterConfig {
        &self.config
    }

    /// Runs every gate against a snapshot and its margin of safety.
    #[must_use]
    pub fn check(&self, data: &RawFinancials, margin_of_safety: f64) -> FilterVerdict {
        if data.trailing_eps.is_none_or(|eps| eps <= 0.0) {
            return FilterVerdict::NonPositiveEps;
        }
        if data.free_cash_flow.is_none_or(|fcf| fcf <= 0.0) {
            return FilterVerdict::NonPositiveFreeCashFlow;
        }
        if let Some(coverage) = self.interest_coverage(data)
            && coverage < self.config.min_interest_coverage
        {
            return FilterVerdict::LowInterestCoverage(coverage);
        }
        if margin_of_safety < self.config.min_margin_of_safety || margin_of_safety.is_nan() {
            return FilterVerdict::LowMarginOfSafety(margin_of_safety);
        }
        FilterVerdict::Approved
    }

    /// |EBITDA / interest expense|, or `None` when interest expense is
    /// unreported or zero.
    #[must_use]
    pub fn interest_coverage(&self, data: &RawFinancials) -> Option<f64> {
        let interest = data.interest_expense.filter(|i| *i != 0.0)?;
        Some((data.ebitda.unwrap_or(0.0) / interest).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivr_traits::PriceHistory;

    fn healthy() -> RawFinancials {
        RawFinancials {
            trailing_eps: Some(2.5),
            free_cash_flow: Some(1e9),
            ebitda: Some(5e9),
            interest_expense: Some(2e8),
            ..RawFinancials::new("GOOD", PriceHistory::new(vec![150.0]))
        }
    }

    #[test]
    fn test_approved() {
        let filter = SafetyFilter::default();
        let verdict = filter.check(&healthy(), 0.45);
        assert!(verdict.passed());
        assert_eq!(verdict.to_string(), "Approved");
    }

    #[test]
    fn test_eps_checked_first() {
        let filter = SafetyFilter::default();
        let mut data = healthy();
        data.trailing_eps = Some(-1.0);
        data.free_cash_flow = Some(-1.0);

        let verdict = filter.check(&data, -0.5);
        assert_eq!(verdict, FilterVerdict::NonPositiveEps);
        assert_eq!(verdict.to_string(), "EPS negative or zero");

        data.trailing_eps = None;
        assert_eq!(filter.check(&data, 0.5), FilterVerdict::NonPositiveEps);
    }

    #[test]
    fn test_free_cash_flow() {
        let filter = SafetyFilter::default();
        let mut data = healthy();
        data.free_cash_flow = Some(0.0);

        let verdict = filter.check(&data, 0.5);
        assert_eq!(verdict, FilterVerdict::NonPositiveFreeCashFlow);
        assert_eq!(verdict.to_string(), "Free Cash Flow negative or zero");
    }

    #[test]
    fn test_low_interest_coverage() {
        let filter = SafetyFilter::default();
        let mut data = healthy();
        data.ebitda = Some(3e8);

        let verdict = filter.check(&data, 0.5);
        assert_eq!(verdict, FilterVerdict::LowInterestCoverage(1.5));
        assert_eq!(verdict.to_string(), "Interest coverage too low: 1.50");
    }

    #[test]
    fn test_coverage_uses_absolute_value() {
        let filter = SafetyFilter::default();
        let mut data = healthy();
        data.interest_expense = Some(-2e8);
        assert!(filter.check(&data, 0.5).passed());
    }

    #[test]
    fn test_coverage_skipped_without_interest() {
        let filter = SafetyFilter::default();
        let mut data = healthy();
        data.ebitda = None;
        data.interest_expense = None;
        assert!(filter.check(&data, 0.5).passed());

        data.interest_expense = Some(0.0);
        assert!(filter.check(&data, 0.5).passed());

        data.interest_expense = Some(1e6);
        assert_eq!(
            filter.check(&data, 0.5),
            FilterVerdict::LowInterestCoverage(0.0)
        );
    }

    #[test]
    fn test_low_margin_of_safety() {
        let filter = SafetyFilter::default();
        let verdict = filter.check(&healthy(), 0.123);
        assert_eq!(verdict, FilterVerdict::LowMarginOfSafety(0.123));
        assert_eq!(verdict.to_string(), "Margin of safety too low: 12.3%");
        assert!(!verdict.passed());
    }

    #[test]
    fn test_margin_threshold_inclusive() {
        let filter = SafetyFilter::default();
        assert!(filter.check(&healthy(), 0.20).passed());
    }
}
