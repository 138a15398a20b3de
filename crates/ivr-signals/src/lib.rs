//! Signal implementations for the IVR screener.
//!
//! This crate turns raw snapshot metrics into bounded `[0, 1]` scores:
//! - Value: relative valuation multiples and the DCF margin of safety
//! - Quality: leverage, liquidity and growth
//! - Momentum: RSI proximity and moving-average trend
//!
//! Every signal resolves missing inputs to a documented neutral value
//! instead of failing.
//!
//! # Example
//!
//! ```ignore
//! use ivr_signals::value::RelativeMultiples;
//! use ivr_signals::registry::available_signals;
//!
//! let signal = RelativeMultiples::default();
//! let score = signal.score(&snapshot);
//!
//! let signals = available_signals();
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod quality;
pub mod registry;
pub mod value;

// Re-export key types
pub use registry::{SignalCategory, SignalInfo};
