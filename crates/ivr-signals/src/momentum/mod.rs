//! Timing signals based on daily closes.
//!
//! - RSI proximity: how close RSI(14) sits to a mildly oversold centre
//! - Trend: whether the 50-day SMA is at or above the 200-day SMA
//!
//! Both fall back to neutral values when the history is too short.

mod rsi;
mod trend;

pub use rsi::{NEUTRAL_RSI, RsiConfig, RsiProximity, relative_strength_index};
pub use trend::{Trend, TrendConfig};
