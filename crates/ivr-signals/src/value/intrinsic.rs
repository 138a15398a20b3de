//! Single-stage discounted cash flow estimate.

use ivr_traits::{RawFinancials, Signal, unit_clamp};
use serde::{Deserialize, Serialize};

/// Configuration for the discounted cash flow model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfConfig {
    /// Discount rate / WACC (default: 0.10)
    pub discount_rate: f64,

    /// Perpetual growth rate after the projection horizon (default: 0.03)
    pub terminal_growth: f64,

    /// Explicit projection horizon in years (default: 5)
    pub horizon_years: u32,

    /// Upper bound for the projected growth rate (default: 0.25)
    pub max_growth: f64,

    /// Growth rate used when earnings growth is unknown (default: 0.05)
    pub default_growth: f64,
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            terminal_growth: 0.03,
            horizon_years: 5,
            max_growth: 0.25,
            default_growth: 0.05,
        }
    }
}

/// Intrinsic value estimate for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Valuation {
    /// Equity value per share, 0 when no estimate is possible.
    pub intrinsic_value: f64,
    /// `(intrinsic_value - price) / price`, 0 when either side is unusable.
    pub margin_of_safety: f64,
}

/// Fractional discount of `price` below `intrinsic_value`.
///
/// Negative when the price exceeds the estimate. Returns 0 when there is no
/// estimate or no positive price.
#[must_use]
pub fn margin_of_safety(intrinsic_value: f64, price: f64) -> f64 {
    if intrinsic_value > 0.0 && price > 0.0 && price.is_finite() {
        (intrinsic_value - price) / price
    } else {
        0.0
    }
}

/// Discounted cash flow estimator.
///
/// Projects free cash flow for the horizon at a constant growth rate,
/// adds a Gordon-growth terminal value, discounts everything at the
/// configured rate, then bridges enterprise value to equity with debt and
/// cash.
///
/// As a [`Signal`], it scores the margin of safety clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct DiscountedCashFlow {
    config: DcfConfig,
}

impl DiscountedCashFlow {
    /// Create a new estimator with the given configuration.
    #[must_use]
    pub const fn new(config: DcfConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &DcfConfig {
        &self.config
    }

    /// Growth rate used for the explicit projection.
    ///
    /// A missing, non-finite or exactly zero earnings growth is treated as
    /// unreported and replaced by the default growth.
    #[must_use]
    pub fn growth_rate(&self, data: &RawFinancials) -> f64 {
        let growth = data
            .earnings_growth
            .filter(|g| g.is_finite() && *g != 0.0)
            .unwrap_or(self.config.default_growth);
        growth.clamp(0.0, self.config.max_growth.max(0.0))
    }

    /// Per-share intrinsic value from explicit inputs.
    ///
    /// Returns 0 when free cash flow or share count is not positive, or
    /// when the discount rate does not exceed the terminal growth rate.
    #[must_use]
    pub fn value_per_share(
        &self,
        free_cash_flow: f64,
        growth: f64,
        total_debt: f64,
        total_cash: f64,
        shares_outstanding: f64,
    ) -> f64 {
        if free_cash_flow <= 0.0 || shares_outstanding <= 0.0 {
            return 0.0;
        }
        let DcfConfig {
            discount_rate,
            terminal_growth,
            horizon_years,
            ..
        } = self.config;
        if discount_rate <= terminal_growth {
            return 0.0;
        }

        let explicit: f64 = (1..=horizon_years)
            .map(|year| {
                let t = f64::from(year);
                free_cash_flow * (1.0 + growth).powf(t) / (1.0 + discount_rate).powf(t)
            })
            .sum();

        let horizon = f64::from(horizon_years);
        let final_fcf = free_cash_flow * (1.0 + growth).powf(horizon);
        let terminal = final_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth);
        let terminal_pv = terminal / (1.0 + discount_rate).powf(horizon);

        let equity = explicit + terminal_pv - total_debt + total_cash;
        let per_share = equity / shares_outstanding;

        if per_share.is_finite() {
            per_share.max(0.0)
        } else {
            0.0
        }
    }

    /// Per-share intrinsic value for a snapshot.
    ///
    /// Missing debt or cash count as zero; missing free cash flow or share
    /// count yield no estimate (0).
    #[must_use]
    pub fn intrinsic_value(&self, data: &RawFinancials) -> f64 {
        let (Some(fcf), Some(shares)) = (data.free_cash_flow, data.shares_outstanding) else {
            return 0.0;
        };
        self.value_per_share(
            fcf,
            self.growth_rate(data),
            data.total_debt.unwrap_or(0.0),
            data.total_cash.unwrap_or(0.0),
            shares,
        )
    }

    /// Intrinsic value and margin of safety against the last close.
    #[must_use]
    pub fn estimate(&self, data: &RawFinancials) -> Valuation {
        let intrinsic_value = self.intrinsic_value(data);
        let price = data.current_price().unwrap_or(0.0);
        Valuation {
            intrinsic_value,
            margin_of_safety: margin_of_safety(intrinsic_value, price),
        }
    }
}

impl Default for DiscountedCashFlow {
    fn default() -> Self {
        Self::new(DcfConfig::default())
    }
}

impl Signal for DiscountedCashFlow {
    fn name(&self) -> &str {
        "dcf_margin_of_safety"
    }

    fn score(&self, data: &RawFinancials) -> f64 {
        unit_clamp(self.estimate(data).margin_of_safety)
    }

    fn lookback(&self) -> usize {
        1
    }

    fn required_fields(&self) -> &[&str] {
        &[
            "free_cash_flow",
            "earnings_growth",
            "total_debt",
            "total_cash",
            "shares_outstanding",
        ]
    }
}
