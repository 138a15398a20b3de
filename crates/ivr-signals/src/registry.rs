//! Signal registry for discovering and categorizing available signals.
//!
//! Lists every normalizer that feeds the IVR sub-scores, with the snapshot
//! fields it reads.

use serde::{Deserialize, Serialize};

/// Signal category, one per IVR sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalCategory {
    /// Valuation signals
    Value,
    /// Balance-sheet health and growth signals
    Quality,
    /// Timing signals on daily closes
    Momentum,
}

impl SignalCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Value => "Price relative to benchmarks and to intrinsic value",
            Self::Quality => "Leverage, liquidity and growth",
            Self::Momentum => "Entry timing from RSI and moving averages",
        }
    }

    /// The IVR sub-score this category feeds.
    #[must_use]
    pub const fn sub_score(&self) -> &str {
        match self {
            Self::Value => "valuation",
            Self::Quality => "quality",
            Self::Momentum => "timing",
        }
    }
}

/// Metadata about a signal.
#[derive(Debug, Clone, Serialize)]
pub struct SignalInfo {
    /// Unique identifier for the signal
    pub name: &'static str,

    /// Category classification
    pub category: SignalCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Weight inside its sub-score
    pub weight_in_sub_score: f64,

    /// Price history needed, in trading days
    pub typical_lookback: usize,

    /// Whether the signal requires fundamental data
    pub requires_fundamentals: bool,
}

/// Get information about all available signals.
#[must_use]
pub fn available_signals() -> Vec<SignalInfo> {
    vec![
        // Value signals
        SignalInfo {
            name: "relative_multiples",
            category: SignalCategory::Value,
            description: "P/E, P/B, P/S and EV/EBITDA relative to benchmarks",
            weight_in_sub_score: 0.5,
            typical_lookback: 0,
            requires_fundamentals: true,
        },
        SignalInfo {
            name: "dcf_margin_of_safety",
            category: SignalCategory::Value,
            description: "Discount of price to single-stage DCF intrinsic value",
            weight_in_sub_score: 0.5,
            typical_lookback: 1,
            requires_fundamentals: true,
        },
        // Quality signals
        SignalInfo {
            name: "leverage",
            category: SignalCategory::Quality,
            description: "Debt/equity against a 1.5 ceiling",
            weight_in_sub_score: 0.25,
            typical_lookback: 0,
            requires_fundamentals: true,
        },
        SignalInfo {
            name: "liquidity",
            category: SignalCategory::Quality,
            description: "Current ratio against an optimal 2.0",
            weight_in_sub_score: 0.25,
            typical_lookback: 0,
            requires_fundamentals: true,
        },
        SignalInfo {
            name: "growth",
            category: SignalCategory::Quality,
            description: "Mean revenue and earnings growth against a 15% target",
            weight_in_sub_score: 0.5,
            typical_lookback: 0,
            requires_fundamentals: true,
        },
        // Momentum signals
        SignalInfo {
            name: "rsi_proximity",
            category: SignalCategory::Momentum,
            description: "Closeness of RSI(14) to 40",
            weight_in_sub_score: 0.7,
            typical_lookback: 15,
            requires_fundamentals: false,
        },
        SignalInfo {
            name: "sma_trend",
            category: SignalCategory::Momentum,
            description: "50-day SMA at or above 200-day SMA",
            weight_in_sub_score: 0.3,
            typical_lookback: 200,
            requires_fundamentals: false,
        },
    ]
}

/// Get all signals in a specific category.
#[must_use]
pub fn signals_by_category(category: &SignalCategory) -> Vec<SignalInfo> {
    available_signals()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific signal by name.
#[must_use]
pub fn get_signal_info(name: &str) -> Option<SignalInfo> {
    available_signals()
        .into_iter()
        .find(|info| info.name == name)
}

/// Get all signal categories with signals.
#[must_use]
pub fn available_categories() -> Vec<SignalCategory> {
    let mut categories: Vec<_> = available_signals()
        .into_iter()
        .map(|info| info.category)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::{RsiProximity, Trend};
    use crate::quality::{Growth, Leverage, Liquidity};
    use crate::value::{DiscountedCashFlow, RelativeMultiples};
    use approx::assert_relative_eq;
    use ivr_traits::Signal;

    #[test]
    fn test_registry_matches_implementations() {
        let signals: Vec<Box<dyn Signal>> = vec![
            Box::new(RelativeMultiples::default()),
            Box::new(DiscountedCashFlow::default()),
            Box::new(Leverage::default()),
            Box::new(Liquidity::default()),
            Box::new(Growth::default()),
            Box::new(RsiProximity::default()),
            Box::new(Trend::default()),
        ];
        assert_eq!(signals.len(), available_signals().len());
        for signal in &signals {
            let info = get_signal_info(signal.name());
            assert!(info.is_some(), "{} missing from registry", signal.name());
        }
    }

    #[test]
    fn test_signals_by_category() {
        assert_eq!(signals_by_category(&SignalCategory::Value).len(), 2);
        assert_eq!(signals_by_category(&SignalCategory::Quality).len(), 3);
        assert_eq!(signals_by_category(&SignalCategory::Momentum).len(), 2);
    }

    #[test]
    fn test_weights_sum_to_one_per_category() {
        for category in available_categories() {
            let total: f64 = signals_by_category(&category)
                .iter()
                .map(|info| info.weight_in_sub_score)
                .sum();
            assert_relative_eq!(total, 1.0);
        }
    }

    #[test]
    fn test_get_signal_info() {
        let info = get_signal_info("sma_trend").unwrap();
        assert_eq!(info.category, SignalCategory::Momentum);
        assert_eq!(info.typical_lookback, 200);
        assert!(!info.requires_fundamentals);

        assert!(get_signal_info("nonexistent_signal").is_none());
    }

    #[test]
    fn test_available_categories() {
        assert_eq!(
            available_categories(),
            vec![
                SignalCategory::Value,
                SignalCategory::Quality,
                SignalCategory::Momentum
            ]
        );
        assert_eq!(SignalCategory::Momentum.sub_score(), "timing");
        assert!(!SignalCategory::Quality.description().is_empty());
    }
}
