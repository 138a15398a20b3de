//! Valuation signals.
//!
//! - Relative multiples: P/E, P/B, P/S and EV/EBITDA against benchmarks
//! - Intrinsic value: single-stage discounted cash flow and the resulting
//!   margin of safety

mod intrinsic;
mod multiples;

pub use intrinsic::{DcfConfig, DiscountedCashFlow, Valuation, margin_of_safety};
pub use multiples::{MultiplesConfig, RelativeMultiples, ratio_score};
