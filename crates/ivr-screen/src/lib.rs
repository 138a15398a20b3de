//! Screening engine for the IVR screener.
//!
//! [`ScoringModel`] is the pure per-snapshot pipeline (normalize, estimate,
//! filter, aggregate). [`ScreeningEngine`] wraps it around a
//! [`DataProvider`](ivr_traits::DataProvider): it fetches snapshots with a
//! timeout and retries, scores a batch of tickers on a bounded number of
//! tokio tasks, and ranks the results.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ivr_screen::{EngineConfig, ScoringModel, ScreeningEngine};
//!
//! let engine = ScreeningEngine::new(Arc::new(provider), ScoringModel::default(), EngineConfig::default());
//! let run = engine.score_many(&["AAPL", "MSFT", "KO"]).await;
//! for entry in run.top(3) {
//!     println!("{} {:.3}", entry.ticker, entry.ivr);
//! }
//! ```

mod engine;
mod model;
mod retry;
pub mod universe;

pub use engine::{EngineConfig, ScreeningEngine};
pub use model::{ModelConfig, ScoringModel};
pub use retry::RetryPolicy;
pub use universe::{Universe, resolve_tickers};
