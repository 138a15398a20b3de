//! Buy/sell classification of IVR scores.

use std::fmt;

use ivr_traits::{ScoreBreakdown, ScreeningRun};
use serde::{Deserialize, Serialize};

/// IVR cut-offs for buy and sell signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Minimum IVR for a strong buy (default: 0.60)
    pub buy: f64,

    /// Maximum IVR for a sell (default: 0.30)
    pub sell: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy: 0.60,
            sell: 0.30,
        }
    }
}

impl SignalThresholds {
    /// Midpoint between the sell and buy thresholds.
    #[must_use]
    pub fn moderate(&self) -> f64 {
        (self.buy + self.sell) / 2.0
    }

    /// Classifies a single IVR value.
    #[must_use]
    pub fn classify(&self, ivr: f64) -> SignalClass {
        if ivr >= self.buy {
            SignalClass::StrongBuy
        } else if ivr >= self.moderate() {
            SignalClass::ModerateBuy
        } else if ivr <= self.sell {
            SignalClass::Sell
        } else {
            SignalClass::Neutral
        }
    }

    /// Whether `ivr` triggers a buy alert.
    #[must_use]
    pub fn is_buy(&self, ivr: f64) -> bool {
        ivr >= self.buy
    }

    /// Whether `ivr` triggers a sell alert.
    #[must_use]
    pub fn is_sell(&self, ivr: f64) -> bool {
        ivr <= self.sell
    }
}

/// Signal class of one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalClass {
    /// IVR at or above the buy threshold.
    StrongBuy,
    /// IVR between the midpoint and the buy threshold.
    ModerateBuy,
    /// Anything between sell and midpoint.
    Neutral,
    /// IVR at or below the sell threshold.
    Sell,
}

impl SignalClass {
    /// Whether this class is one of the buy classes.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::StrongBuy | Self::ModerateBuy)
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StrongBuy => "STRONG BUY",
            Self::ModerateBuy => "MODERATE BUY",
            Self::Neutral => "NEUTRAL",
            Self::Sell => "SELL",
        };
        f.pad(label)
    }
}

/// Buy and sell subsets of a run, in rank order.
#[derive(Debug, Clone, Default)]
pub struct AlertDigest<'a> {
    /// Entries with IVR at or above the buy threshold.
    pub buys: Vec<&'a ScoreBreakdown>,
    /// Entries with IVR at or below the sell threshold.
    pub sells: Vec<&'a ScoreBreakdown>,
}

impl<'a> AlertDigest<'a> {
    /// Collects the buy and sell signals of `run`.
    ///
    /// Filter rejections score 0 and therefore always land among the sells.
    #[must_use]
    pub fn from_run(run: &'a ScreeningRun, thresholds: &SignalThresholds) -> Self {
        let (mut buys, mut sells) = (Vec::new(), Vec::new());
        for entry in run {
            if thresholds.is_buy(entry.ivr) {
                buys.push(entry);
            } else if thresholds.is_sell(entry.ivr) {
                sells.push(entry);
            }
        }
        Self { buys, sells }
    }

    /// Whether there is nothing to alert on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }

    /// E-mail subject line.
    #[must_use]
    pub fn subject(&self) -> String {
        format!(
            "IVR Screener - {} buys, {} sells",
            self.buys.len(),
            self.sells.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(ticker: &str, ivr: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            ticker: ticker.to_string(),
            name: format!("{ticker} Inc."),
            sector: "Technology".to_string(),
            price: 100.0,
            intrinsic_value: 150.0,
            margin_of_safety: 0.5,
            ivr,
            valuation_score: ivr,
            quality_score: ivr,
            timing_score: ivr,
            rsi: 45.0,
            passes_filter: ivr > 0.0,
            filter_reason: String::new(),
        }
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = SignalThresholds::default();
        assert_relative_eq!(thresholds.buy, 0.60);
        assert_relative_eq!(thresholds.sell, 0.30);
        assert_relative_eq!(thresholds.moderate(), 0.45);
    }

    #[test]
    fn test_classify_boundaries() {
        let t = SignalThresholds::default();
        assert_eq!(t.classify(0.60), SignalClass::StrongBuy);
        assert_eq!(t.classify(0.95), SignalClass::StrongBuy);
        assert_eq!(t.classify(0.50), SignalClass::ModerateBuy);
        assert_eq!(t.classify(0.40), SignalClass::Neutral);
        assert_eq!(t.classify(0.30), SignalClass::Sell);
        assert_eq!(t.classify(0.0), SignalClass::Sell);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(SignalClass::StrongBuy.to_string(), "STRONG BUY");
        assert_eq!(SignalClass::Sell.to_string(), "SELL");
        assert!(SignalClass::ModerateBuy.is_buy());
        assert!(!SignalClass::Neutral.is_buy());
    }

    #[test]
    fn test_digest_from_run() {
        let run = ScreeningRun::rank(vec![
            entry("AAA", 0.72),
            entry("BBB", 0.45),
            entry("CCC", 0.0),
            entry("DDD", 0.61),
            entry("EEE", 0.25),
        ]);
        let digest = AlertDigest::from_run(&run, &SignalThresholds::default());

        let buys: Vec<&str> = digest.buys.iter().map(|e| e.ticker.as_str()).collect();
        let sells: Vec<&str> = digest.sells.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(buys, vec!["AAA", "DDD"]);
        assert_eq!(sells, vec!["EEE", "CCC"]);
        assert!(!digest.is_empty());
        assert_eq!(digest.subject(), "IVR Screener - 2 buys, 2 sells");
    }

    #[test]
    fn test_digest_empty_when_all_neutral() {
        let run = ScreeningRun::rank(vec![entry("AAA", 0.40), entry("BBB", 0.50)]);
        let digest = AlertDigest::from_run(&run, &SignalThresholds::default());
        assert!(digest.is_empty());
        assert_eq!(digest.subject(), "IVR Screener - 0 buys, 0 sells");
    }
}
