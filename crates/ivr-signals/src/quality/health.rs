//! Financial health signals: leverage and liquidity.

use ivr_traits::{RawFinancials, Signal, unit_clamp};
use serde::{Deserialize, Serialize};

/// Configuration for the leverage signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeverageConfig {
    /// Debt/equity at which the score reaches 0 (default: 1.5)
    pub max_good_de: f64,
}

impl Default for LeverageConfig {
    fn default() -> Self {
        Self { max_good_de: 1.5 }
    }
}

/// Leverage signal.
///
/// Scores `1 - debt_to_equity / max_good_de`, clamped to `[0, 1]`.
/// An unreported debt/equity counts as an unlevered balance sheet.
#[derive(Debug, Clone)]
pub struct Leverage {
    config: LeverageConfig,
}

impl Leverage {
    /// Create a new leverage signal with the given configuration.
    #[must_use]
    pub const fn new(config: LeverageConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &LeverageConfig {
        &self.config
    }
}

impl Default for Leverage {
    fn default() -> Self {
        Self::new(LeverageConfig::default())
    }
}

impl Signal for Leverage {
    fn name(&self) -> &str {
        "leverage"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        if self.config.max_good_de <= 0.0 {
            return 0.0;
        }
        let de = data.debt_to_equity.unwrap_or(0.0);
        unit_clamp(1.0 - de / self.config.max_good_de)
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> &[&str] {
        &["debt_to_equity"]
    }
}

/// Configuration for the liquidity signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidityConfig {
    /// Current ratio that earns a full score (default: 2.0)
    pub optimal_current_ratio: f64,

    /// Current ratio assumed when none is reported (default: 1.0)
    pub default_current_ratio: f64,
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            optimal_current_ratio: 2.0,
            default_current_ratio: 1.0,
        }
    }
}

/// Liquidity signal: `current_ratio / optimal_current_ratio`, clamped.
#[derive(Debug, Clone)]
pub struct Liquidity {
    config: LiquidityConfig,
}

impl Liquidity {
    /// Create a new liquidity signal with the given configuration.
    #[must_use]
    pub const fn new(config: LiquidityConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &LiquidityConfig {
        &self.config
    }
}

impl Default for Liquidity {
    fn default() -> Self {
        Self::new(LiquidityConfig::default())
    }
}

impl Signal for Liquidity {
    fn name(&self) -> &str {
        "liquidity"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        if self.config.optimal_current_ratio <= 0.0 {
            return 0.0;
        }
        let cr = data
            .current_ratio
            .unwrap_or(self.config.default_current_ratio);
        unit_clamp(cr / self.config.optimal_current_ratio)
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> &[&str] {
        &["current_ratio"]
    }
}
