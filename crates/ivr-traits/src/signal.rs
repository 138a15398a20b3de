//! Signal trait for bounded metric scores.
//!
//! A signal converts one facet of a [`RawFinancials`] snapshot into a score
//! in `[0, 1]`. Missing inputs never fail: every signal documents the
//! neutral value it falls back to.

use crate::RawFinancials;

/// A normalized score derived from a ticker snapshot.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single scoring
/// model can be shared across concurrent screening tasks.
///
/// # Example
///
/// ```no_run
/// use ivr_traits::{RawFinancials, Signal, unit_clamp};
///
/// struct PositiveEps;
///
/// impl Signal for PositiveEps {
///     fn name(&self) -> &str {
///         "positive_eps"
///     }
///
///     fn score(&self, data: &RawFinancials) -> f64 {
///         unit_clamp(data.trailing_eps.unwrap_or(0.0).signum())
///     }
///
///     fn lookback(&self) -> usize {
///         0
///     }
///
///     fn required_fields(&self) -> &[&str] {
///         &["trailing_eps"]
///     }
/// }
/// ```
pub trait Signal: Send + Sync {
    /// Unique, descriptive name used in logs and the signal registry.
    fn name(&self) -> &str;

    /// Computes the score for a snapshot.
    ///
    /// The result is always within `[0, 1]`.
    fn score(&self, data: &RawFinancials) -> f64;

    /// Number of daily closes needed for a non-neutral score.
    ///
    /// Fundamental signals return 0.
    fn lookback(&self) -> usize;

    /// Snapshot fields this signal reads.
    fn required_fields(&self) -> &[&str];
}

/// Clamps a value into `[0, 1]`, mapping NaN to 0.
#[must_use]
pub fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriceHistory;

    struct ConstantSignal(f64);

    impl Signal for ConstantSignal {
        fn name(&self) -> &str {
            "constant"
        }

        fn score(&self, _data: &RawFinancials) -> f64 {
            unit_clamp(self.0)
        }

        fn lookback(&self) -> usize {
            0
        }

        fn required_fields(&self) -> &[&str] {
            &[]
        }
    }

    #[test]
    fn test_unit_clamp() {
        assert_eq!(unit_clamp(-0.5), 0.0);
        assert_eq!(unit_clamp(0.25), 0.25);
        assert_eq!(unit_clamp(3.0), 1.0);
        assert_eq!(unit_clamp(f64::NAN), 0.0);
        assert_eq!(unit_clamp(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_signal_trait_object() {
        let signals: Vec<Box<dyn Signal>> =
            vec![Box::new(ConstantSignal(0.4)), Box::new(ConstantSignal(7.0))];
        let data = RawFinancials::new("TEST", PriceHistory::default());

        let scores: Vec<f64> = signals.iter().map(|s| s.score(&data)).collect();
        assert_eq!(scores, vec![0.4, 1.0]);
        assert_eq!(signals[0].name(), "constant");
    }
}
