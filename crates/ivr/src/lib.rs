#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ivr-screener/ivr/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use ivr::prelude::*;
//! use ivr::fmp::FmpClient;
//!
//! # async fn example() -> Result<()> {
//! let provider = Arc::new(FmpClient::from_env().map_err(IvrError::from)?);
//! let engine = ScreeningEngine::new(provider, ScoringModel::default(), EngineConfig::default());
//!
//! let run = engine.score_many(&["AAPL", "KO", "JNJ"]).await;
//! for entry in run.top(3) {
//!     println!("{:<6} {:.3} {}", entry.ticker, entry.ivr, entry.filter_reason);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types and trait definitions ([`Signal`], [`DataProvider`])
//! - [`signals`] - Valuation, quality and momentum signals
//! - [`combine`] - Sub-score aggregation, safety filter and weighting
//! - [`screen`] - Scoring model, screening engine and universes
//! - [`fmp`] - Financial Modeling Prep data provider
//! - [`report`] - Alerts and run history

/// Version information for the ivr crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use ivr_traits::*;
}

pub use ivr_combine::Combiner;
pub use ivr_traits::{DataProvider, Signal};

pub use ivr_traits::{IvrError, Result};

pub use ivr_traits::{PriceHistory, RawFinancials, ScoreBreakdown, ScreeningRun, Symbol};

// ============================================================================
// Scoring
// ============================================================================

/// Signal implementations.
///
/// ## Valuation
///
/// - **Relative multiples**: P/E, P/B, P/S and EV/EBITDA against benchmarks
/// - **DCF margin of safety**: five-year projection plus Gordon terminal value
///
/// ## Quality
///
/// - **Leverage**: debt-to-equity
/// - **Liquidity**: current ratio, best at 2.0
/// - **Growth**: earnings CAGR, best at 15%
///
/// ## Momentum
///
/// - **RSI proximity**: closeness of RSI(14) to the oversold level
/// - **SMA trend**: price vs SMA50 vs SMA200
pub mod signals {
    pub use ivr_signals::*;
}

/// Sub-score aggregation, safety filter and weighted combination.
///
/// ```text
/// IVR = w_v * valuation + w_q * quality + w_t * timing   (filter passed)
/// IVR = 0                                                (filter failed)
/// ```
pub mod combine {
    pub use ivr_combine::*;
}

/// Scoring model, concurrent screening engine and ticker universes.
pub mod screen {
    pub use ivr_screen::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// Set `FMP_API_KEY` in the environment or a `.env` file.
pub mod fmp {
    pub use ivr_fmp::*;
}

// ============================================================================
// Reporting
// ============================================================================

/// Signal classification, e-mail alerts and CSV history.
pub mod report {
    pub use ivr_report::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ivr::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{Combiner, DataProvider, Signal};
    pub use crate::{IvrError, Result};
    pub use ivr_combine::{WeightConfig, WeightedCombiner};
    pub use ivr_report::{SignalClass, SignalThresholds};
    pub use ivr_screen::{EngineConfig, ScoringModel, ScreeningEngine};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_signal(_signal: &dyn Signal) {}
        fn _accept_provider(_provider: &dyn DataProvider) {}
        fn _accept_combiner(_combiner: &dyn Combiner) {}
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = IvrError::DataFetch("test".to_string());
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_prelude_scores_snapshot() {
        use prelude::*;

        let prices: PriceHistory = (0..250).map(|i| 100.0 + f64::from(i) * 0.1).collect();
        let snapshot = RawFinancials::new("TEST", prices);
        let breakdown = ScoringModel::default().evaluate(&snapshot);
        assert_eq!(breakdown.ticker, "TEST");
        assert!((0.0..=1.0).contains(&breakdown.ivr));
    }
}
