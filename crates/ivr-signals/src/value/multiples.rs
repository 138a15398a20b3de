//! Relative valuation multiples signal.

use ivr_traits::{RawFinancials, Signal, unit_clamp};
use serde::{Deserialize, Serialize};

/// Configuration for the relative multiples signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplesConfig {
    /// P/B benchmark used when the snapshot has no industry P/B (default: 2.5)
    pub default_industry_pb: f64,

    /// P/S benchmark used when the snapshot has no industry P/S (default: 2.0)
    pub default_industry_ps: f64,

    /// Market-wide EV/EBITDA benchmark (default: 12.0)
    pub market_ev_ebitda: f64,

    /// Score when no multiple can be computed (default: 0.5)
    pub neutral_score: f64,
}

impl Default for MultiplesConfig {
    fn default() -> Self {
        Self {
            default_industry_pb: 2.5,
            default_industry_ps: 2.0,
            market_ev_ebitda: 12.0,
            neutral_score: 0.5,
        }
    }
}

/// Scores one multiple against its benchmark.
///
/// Returns `clamp(1 - subject / benchmark, 0, 1)`, so a multiple at or
/// above the benchmark scores 0 and cheaper multiples score linearly
/// higher. Returns `None` when either input is missing, non-positive or
/// non-finite.
#[must_use]
pub fn ratio_score(subject: Option<f64>, benchmark: Option<f64>) -> Option<f64> {
    match (subject, benchmark) {
        (Some(s), Some(b)) if s > 0.0 && b > 0.0 && s.is_finite() && b.is_finite() => {
            Some(unit_clamp(1.0 - s / b))
        }
        _ => None,
    }
}

/// Relative multiples signal.
///
/// Averages the scores of every available multiple:
/// 1. Trailing P/E vs industry P/E (forward P/E when no industry figure)
/// 2. P/B vs industry P/B
/// 3. P/S vs industry P/S
/// 4. EV/EBITDA vs the market average
///
/// # Example
///
/// ```ignore
/// use ivr_signals::value::RelativeMultiples;
///
/// let signal = RelativeMultiples::default();
/// let score = signal.score(&snapshot);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelativeMultiples {
    config: MultiplesConfig,
}

impl RelativeMultiples {
    /// Create a new relative multiples signal with the given configuration.
    #[must_use]
    pub const fn new(config: MultiplesConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &MultiplesConfig {
        &self.config
    }

    /// Per-multiple scores in the order P/E, P/B, P/S, EV/EBITDA.
    #[must_use]
    pub fn components(&self, data: &RawFinancials) -> [Option<f64>; 4] {
        let pe_benchmark = data
            .industry_pe
            .filter(|pe| *pe > 0.0)
            .or(data.forward_pe);
        let pb_benchmark = data.industry_pb.unwrap_or(self.config.default_industry_pb);
        let ps_benchmark = data.industry_ps.unwrap_or(self.config.default_industry_ps);

        [
            ratio_score(data.trailing_pe, pe_benchmark),
            ratio_score(data.price_to_book, Some(pb_benchmark)),
            ratio_score(data.price_to_sales, Some(ps_benchmark)),
            ratio_score(data.ev_to_ebitda, Some(self.config.market_ev_ebitda)),
        ]
    }
}

impl Signal for RelativeMultiples {
    fn name(&self) -> &str {
        "relative_multiples"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        let available: Vec<f64> = self.components(data).into_iter().flatten().collect();
        if available.is_empty() {
            return unit_clamp(self.config.neutral_score);
        }
        unit_clamp(available.iter().sum::<f64>() / available.len() as f64)
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> &[&str] {
        &[
            "trailing_pe",
            "industry_pe",
            "forward_pe",
            "price_to_book",
            "price_to_sales",
            "ev_to_ebitda",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ivr_traits::PriceHistory;

    fn snapshot() -> RawFinancials {
        RawFinancials::new("TEST", PriceHistory::new(vec![100.0]))
    }

    #[test]
    fn test_default_config() {
        let config = MultiplesConfig::default();
        assert_relative_eq!(config.default_industry_pb, 2.5);
        assert_relative_eq!(config.default_industry_ps, 2.0);
        assert_relative_eq!(config.market_ev_ebitda, 12.0);
        assert_relative_eq!(config.neutral_score, 0.5);
    }

    #[test]
    fn test_ratio_score_bounds() {
        assert_relative_eq!(ratio_score(Some(15.0), Some(20.0)).unwrap(), 0.25);
        assert_relative_eq!(ratio_score(Some(30.0), Some(20.0)).unwrap(), 0.0);
        assert!(ratio_score(None, Some(20.0)).is_none());
        assert!(ratio_score(Some(15.0), None).is_none());
        assert!(ratio_score(Some(-3.0), Some(20.0)).is_none());
        assert!(ratio_score(Some(15.0), Some(0.0)).is_none());
    }

    #[test]
    fn test_ratio_score_non_increasing() {
        let benchmark = Some(20.0);
        let mut previous = f64::INFINITY;
        for pe in [1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0] {
            let score = ratio_score(Some(pe), benchmark).unwrap();
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_all_missing_is_neutral() {
        let signal = RelativeMultiples::default();
        assert_relative_eq!(signal.score(&snapshot()), 0.5);
    }

    #[test]
    fn test_single_pe_multiple() {
        let mut data = snapshot();
        data.trailing_pe = Some(15.0);
        data.industry_pe = Some(20.0);

        let signal = RelativeMultiples::default();
        let components = signal.components(&data);
        assert_relative_eq!(components[0].unwrap(), 0.25);
        assert!(components[1..].iter().all(Option::is_none));
        assert_relative_eq!(signal.score(&data), 0.25);
    }

    #[test]
    fn test_forward_pe_fallback() {
        let mut data = snapshot();
        data.trailing_pe = Some(10.0);
        data.forward_pe = Some(40.0);

        let signal = RelativeMultiples::default();
        assert_relative_eq!(signal.components(&data)[0].unwrap(), 0.75);

        data.industry_pe = Some(0.0);
        assert_relative_eq!(signal.components(&data)[0].unwrap(), 0.75);
    }

    #[test]
    fn test_default_benchmarks_and_average() {
        let mut data = snapshot();
        data.price_to_book = Some(1.25); // 1 - 1.25/2.5 = 0.5
        data.price_to_sales = Some(3.0); // above 2.0 -> 0
        data.ev_to_ebitda = Some(3.0); // 1 - 3/12 = 0.75

        let signal = RelativeMultiples::default();
        assert_relative_eq!(signal.score(&data), (0.5 + 0.0 + 0.75) / 3.0);
    }

    #[test]
    fn test_non_positive_multiples_are_excluded() {
        let mut data = snapshot();
        data.trailing_pe = Some(-12.0);
        data.industry_pe = Some(20.0);
        data.ev_to_ebitda = Some(6.0);

        let signal = RelativeMultiples::default();
        assert_relative_eq!(signal.score(&data), 0.5);
    }
}
