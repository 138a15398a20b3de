//! Quality signals based on balance-sheet health and growth.
//!
//! - Leverage: debt/equity against a tolerable maximum
//! - Liquidity: current ratio against an optimal level
//! - Growth: blended revenue and earnings growth against a target CAGR

mod growth;
mod health;

pub use growth::{Growth, GrowthConfig};
pub use health::{Leverage, LeverageConfig, Liquidity, LiquidityConfig};
