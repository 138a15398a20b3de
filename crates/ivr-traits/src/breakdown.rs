//! Screening results.

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Per-ticker scoring result.
///
/// All sub-scores and `ivr` lie in `[0, 1]`; `ivr` is exactly zero whenever
/// `passes_filter` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Display name (company long name or the ticker).
    pub name: String,
    /// Sector, `"N/A"` when unknown.
    pub sector: String,
    /// Last close.
    pub price: f64,
    /// DCF intrinsic value per share, 0 when no estimate is possible.
    pub intrinsic_value: f64,
    /// Fractional discount of price to intrinsic value.
    pub margin_of_safety: f64,
    /// Composite Relative Valuation Index.
    pub ivr: f64,
    /// Valuation sub-score.
    pub valuation_score: f64,
    /// Quality sub-score.
    pub quality_score: f64,
    /// Timing sub-score.
    pub timing_score: f64,
    /// RSI(14) of daily closes.
    pub rsi: f64,
    /// Whether the safety filter approved the ticker.
    pub passes_filter: bool,
    /// Human-readable filter verdict.
    pub filter_reason: String,
}

/// Ranked results of one screening invocation.
///
/// Entries are sorted by descending IVR; equal IVRs keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreeningRun {
    entries: Vec<ScoreBreakdown>,
}

impl ScreeningRun {
    /// Ranks breakdowns given in input order.
    #[must_use]
    pub fn rank(mut entries: Vec<ScoreBreakdown>) -> Self {
        // `sort_by` is stable, so ties keep input order.
        entries.sort_by(|a, b| b.ivr.total_cmp(&a.ivr));
        Self { entries }
    }

    /// Number of scored tickers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no ticker could be scored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScoreBreakdown> {
        self.entries.iter()
    }

    /// Entries as a slice, in rank order.
    pub fn as_slice(&self) -> &[ScoreBreakdown] {
        &self.entries
    }

    /// The best `n` entries.
    pub fn top(&self, n: usize) -> &[ScoreBreakdown] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Entries that passed the safety filter.
    pub fn passing(&self) -> impl Iterator<Item = &ScoreBreakdown> {
        self.entries.iter().filter(|e| e.passes_filter)
    }

    /// Looks up a ticker (case-insensitive).
    pub fn get(&self, ticker: &str) -> Option<&ScoreBreakdown> {
        self.entries
            .iter()
            .find(|e| e.ticker.eq_ignore_ascii_case(ticker))
    }

    /// Consumes the run, returning the ranked entries.
    pub fn into_inner(self) -> Vec<ScoreBreakdown> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ScreeningRun {
    type Item = &'a ScoreBreakdown;
    type IntoIter = std::slice::Iter<'a, ScoreBreakdown>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
