//! Blends normalizer outputs into the three IVR sub-scores.

use ivr_signals::momentum::{RsiConfig, RsiProximity, Trend, TrendConfig};
use ivr_signals::quality::{
    Growth, GrowthConfig, Leverage, LeverageConfig, Liquidity, LiquidityConfig,
};
use ivr_signals::value::{
    DcfConfig, DiscountedCashFlow, MultiplesConfig, RelativeMultiples, Valuation,
};
use ivr_traits::{RawFinancials, Signal, unit_clamp};
use serde::{Deserialize, Serialize};

use crate::combiner::SubScores;

/// Parameters for every normalizer feeding the sub-scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Relative multiples benchmarks
    pub multiples: MultiplesConfig,

    /// Discounted cash flow parameters
    pub dcf: DcfConfig,

    /// Debt/equity ceiling
    pub leverage: LeverageConfig,

    /// Current ratio target
    pub liquidity: LiquidityConfig,

    /// Growth target
    pub growth: GrowthConfig,

    /// RSI window and centre
    pub rsi: RsiConfig,

    /// Moving-average windows
    pub trend: TrendConfig,
}

/// Sub-scores plus the intermediate values reported alongside them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    /// Valuation, quality and timing sub-scores.
    pub scores: SubScores,
    /// DCF intrinsic value and margin of safety.
    pub valuation: Valuation,
    /// RSI of the daily closes.
    pub rsi: f64,
}

/// Computes the valuation, quality and timing sub-scores for a snapshot.
///
/// - valuation = 0.5 x multiples + 0.5 x clamp(margin of safety)
/// - quality = 0.5 x (0.5 x leverage + 0.5 x liquidity) + 0.5 x growth
/// - timing = 0.7 x RSI proximity + 0.3 x trend
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    multiples: RelativeMultiples,
    dcf: DiscountedCashFlow,
    leverage: Leverage,
    liquidity: Liquidity,
    growth: Growth,
    rsi: RsiProximity,
    trend: Trend,
}

impl ScoreAggregator {
    /// Create an aggregator from normalizer parameters.
    #[must_use]
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            multiples: RelativeMultiples::new(config.multiples),
            dcf: DiscountedCashFlow::new(config.dcf),
            leverage: Leverage::new(config.leverage),
            liquidity: Liquidity::new(config.liquidity),
            growth: Growth::new(config.growth),
            rsi: RsiProximity::new(config.rsi),
            trend: Trend::new(config.trend),
        }
    }

    /// Valuation sub-score and the DCF estimate behind it.
    #[must_use]
    pub fn valuation_score(&self, data: &RawFinancials) -> (f64, Valuation) {
        let valuation = self.dcf.estimate(data);
        let multiples = self.multiples.score(data);
        let score = 0.5 * multiples + 0.5 * unit_clamp(valuation.margin_of_safety);
        (unit_clamp(score), valuation)
    }

    /// Quality sub-score.
    #[must_use]
    pub fn quality_score(&self, data: &RawFinancials) -> f64 {
        let health = 0.5 * self.leverage.score(data) + 0.5 * self.liquidity.score(data);
        unit_clamp(0.5 * health + 0.5 * self.growth.score(data))
    }

    /// Timing sub-score and the RSI behind it.
    #[must_use]
    pub fn timing_score(&self, data: &RawFinancials) -> (f64, f64) {
        let rsi = self.rsi.rsi(data);
        let score = 0.7 * self.rsi.score_rsi(rsi) + 0.3 * self.trend.score(data);
        (unit_clamp(score), rsi)
    }

    /// All three sub-scores for one snapshot.
    #[must_use]
    pub fn assess(&self, data: &RawFinancials) -> Assessment {
        let (valuation_score, valuation) = self.valuation_score(data);
        let (timing, rsi) = self.timing_score(data);
        Assessment {
            scores: SubScores {
                valuation: valuation_score,
                quality: self.quality_score(data),
                timing,
            },
            valuation,
            rsi,
        }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}
