//! Sub-score aggregation and composite scoring for the IVR screener.
//!
//! The pipeline for one snapshot is:
//! 1. [`ScoreAggregator`] runs the normalizers and blends them into the
//!    valuation, quality and timing sub-scores.
//! 2. [`SafetyFilter`] applies the hard gates (EPS, free cash flow,
//!    interest coverage, margin of safety).
//! 3. A [`Combiner`] turns the sub-scores into the composite IVR, which is
//!    forced to zero when the filter rejects the ticker.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ivr_combine::{Combiner, FilterVerdict, SubScores, WeightConfig, WeightedCombiner};
//!
//! let combiner = WeightedCombiner::new(WeightConfig::default());
//! let scores = SubScores {
//!     valuation: 0.8,
//!     quality: 0.6,
//!     timing: 0.4,
//! };
//!
//! let ivr = combiner.combine(&scores, &FilterVerdict::Approved).unwrap();
//! ```

mod aggregator;
mod combiner;
mod filter;
mod weighted;
mod weights;

// Re-export main types
pub use aggregator::{AggregatorConfig, Assessment, ScoreAggregator};
pub use combiner::{Combiner, SubScores};
pub use filter::{FilterVerdict, SafetyFilter, SafetyFilterConfig};
pub use weighted::WeightedCombiner;
pub use weights::WeightConfig;
