//! Per-snapshot scoring pipeline.

use ivr_combine::{
    AggregatorConfig, Combiner, SafetyFilter, SafetyFilterConfig, ScoreAggregator, WeightConfig,
    WeightedCombiner,
};
use ivr_traits::{RawFinancials, ScoreBreakdown};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Everything that parameterizes a [`ScoringModel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Sub-score weights
    pub weights: WeightConfig,

    /// Normalizer parameters
    pub signals: AggregatorConfig,

    /// Safety filter thresholds
    pub filter: SafetyFilterConfig,
}

/// Pure scoring pipeline: normalize, estimate, filter, aggregate.
///
/// Holds no state between calls, so evaluating the same snapshot twice
/// yields identical breakdowns.
#[derive(Debug, Clone)]
pub struct ScoringModel {
    aggregator: ScoreAggregator,
    filter: SafetyFilter,
    combiner: WeightedCombiner,
}

impl ScoringModel {
    /// Create a model from its configuration.
    #[must_use]
    pub fn new(config: ModelConfig) -> Self {
        Self {
            aggregator: ScoreAggregator::new(config.signals),
            filter: SafetyFilter::new(config.filter),
            combiner: WeightedCombiner::new(config.weights),
        }
    }

    /// Default normalizers and filter with custom weights.
    #[must_use]
    pub fn with_weights(weights: WeightConfig) -> Self {
        Self::new(ModelConfig {
            weights,
            ..ModelConfig::default()
        })
    }

    /// The normalized weights in use.
    #[must_use]
    pub const fn weights(&self) -> &WeightConfig {
        self.combiner.weights()
    }

    /// Scores one snapshot.
    #[must_use]
    pub fn evaluate(&self, data: &RawFinancials) -> ScoreBreakdown {
        let assessment = self.aggregator.assess(data);
        let verdict = self
            .filter
            .check(data, assessment.valuation.margin_of_safety);

        let ivr = self
            .combiner
            .combine(&assessment.scores, &verdict)
            .unwrap_or_else(|e| {
                warn!(ticker = %data.ticker, error = %e, "Composite failed, scoring as zero");
                0.0
            });

        ScoreBreakdown {
            ticker: data.ticker.clone(),
            name: data.display_name().to_string(),
            sector: data.sector_label().to_string(),
            price: data.current_price().unwrap_or(0.0),
            intrinsic_value: assessment.valuation.intrinsic_value,
            margin_of_safety: assessment.valuation.margin_of_safety,
            ivr,
            valuation_score: assessment.scores.valuation,
            quality_score: assessment.scores.quality,
            timing_score: assessment.scores.timing,
            rsi: assessment.rsi,
            passes_filter: verdict.passed(),
            filter_reason: verdict.to_string(),
        }
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}
