//! Relative Strength Index and the RSI proximity signal.

use ivr_traits::{PriceHistory, RawFinancials, Signal, unit_clamp};
use ndarray::s;
use serde::{Deserialize, Serialize};

/// RSI reported when the history is too short or the ratio is undefined.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index over the last `period` close-to-close changes.
///
/// Average gain and average loss are simple means over the window. A window
/// with losses but no gains yields 0; gains but no losses yields 100; a flat
/// window is undefined and yields [`NEUTRAL_RSI`], as does a history with
/// fewer than `period + 1` closes.
#[must_use]
pub fn relative_strength_index(prices: &PriceHistory, period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let deltas = prices.deltas();
    let start = deltas.len() - period;
    let recent = deltas.slice(s![start..]);

    let n = period as f64;
    let avg_gain = recent.iter().filter(|d| **d > 0.0).sum::<f64>() / n;
    let avg_loss = recent.iter().filter(|d| **d < 0.0).map(|d| d.abs()).sum::<f64>() / n;

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI };
    }
    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    if rsi.is_finite() { rsi } else { NEUTRAL_RSI }
}

/// Configuration for the RSI proximity signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    /// RSI window in trading days (default: 14)
    pub period: usize,

    /// RSI level that earns a full score (default: 40.0)
    pub center: f64,

    /// Distance from the centre at which the score reaches 0 (default: 40.0)
    pub range: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            center: 40.0,
            range: 40.0,
        }
    }
}

/// RSI proximity signal.
///
/// Scores `1 - |RSI - center| / range`, clamped to `[0, 1]`. With the
/// defaults the score peaks at RSI 40 and reaches 0 at RSI 0 and 80.
#[derive(Debug, Clone)]
pub struct RsiProximity {
    config: RsiConfig,
}

impl RsiProximity {
    /// Create a new RSI proximity signal with the given configuration.
    #[must_use]
    pub const fn new(config: RsiConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RsiConfig {
        &self.config
    }

    /// RSI of the snapshot's closes.
    #[must_use]
    pub fn rsi(&self, data: &RawFinancials) -> f64 {
        relative_strength_index(&data.prices, self.config.period)
    }

    /// Proximity score for an already computed RSI.
    #[must_use]
    pub fn score_rsi(&self, rsi: f64) -> f64 {
        if self.config.range <= 0.0 {
            return 0.0;
        }
        unit_clamp(1.0 - (rsi - self.config.center).abs() / self.config.range)
    }
}

impl Default for RsiProximity {
    fn default() -> Self {
        Self::new(RsiConfig::default())
    }
}

impl Signal for RsiProximity {
    fn name(&self) -> &str {
        "rsi_proximity"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        self.score_rsi(self.rsi(data))
    }

    fn lookback(&self) -> usize {
        self.config.period + 1
    }

    fn required_fields(&self) -> &[&str] {
        &["close"]
    }
}
