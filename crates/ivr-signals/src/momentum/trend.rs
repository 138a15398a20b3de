//! Moving-average trend signal.

use ivr_traits::{RawFinancials, Signal};
use serde::{Deserialize, Serialize};

/// Configuration for the trend signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Fast SMA window (default: 50)
    pub short_window: usize,

    /// Slow SMA window (default: 200)
    pub long_window: usize,

    /// Score when the history is shorter than the slow window (default: 0.5)
    pub neutral_score: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            short_window: 50,
            long_window: 200,
            neutral_score: 0.5,
        }
    }
}

/// Trend signal: 1 when the fast SMA is at or above the slow SMA, else 0.
#[derive(Debug, Clone)]
pub struct Trend {
    config: TrendConfig,
}

impl Trend {
    /// Create a new trend signal with the given configuration.
    #[must_use]
    pub const fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &TrendConfig {
        &self.config
    }
}

impl Default for Trend {
    fn default() -> Self {
        Self::new(TrendConfig::default())
    }
}

impl Signal for Trend {
    fn name(&self) -> &str {
        "sma_trend"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        if data.prices.len() < self.config.long_window {
            return self.config.neutral_score;
        }
        match (
            data.prices.sma(self.config.short_window),
            data.prices.sma(self.config.long_window),
        ) {
            (Some(fast), Some(slow)) if fast >= slow => 1.0,
            (Some(_), Some(_)) => 0.0,
            _ => self.config.neutral_score,
        }
    }

    fn lookback(&self) -> usize {
        self.config.long_window
    }

    fn required_fields(&self) -> &[&str] {
        &["close"]
    }
}
