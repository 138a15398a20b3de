#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ivr-screener/ivr/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

//! Core types and trait definitions for the IVR equity screener.
//!
//! This crate provides the foundational abstractions shared by the scoring
//! engine, the data providers, and the reporting layer.

/// The version of the ivr-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod breakdown;
pub mod error;
pub mod provider;
pub mod signal;
pub mod types;

// Re-exports
pub use breakdown::{ScoreBreakdown, ScreeningRun};
pub use error::{IvrError, Result};
pub use provider::DataProvider;
pub use signal::{Signal, unit_clamp};
pub use types::{PriceHistory, RawFinancials, Symbol};
