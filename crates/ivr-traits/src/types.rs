//! Snapshot types returned by data providers.
//!
//! A [`RawFinancials`] holds every fundamental as an explicit `Option` so
//! that each fallback path in the normalizers is visible at the call site.

use ndarray::{Array1, ArrayView1, s};

/// A market symbol identifier, e.g. "AAPL".
pub type Symbol = String;

/// Daily closing prices, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    closes: Array1<f64>,
}

impl PriceHistory {
    /// Creates a price history from closes ordered oldest to newest.
    #[must_use]
    pub fn new(closes: Vec<f64>) -> Self {
        Self {
            closes: Array1::from_vec(closes),
        }
    }

    /// Number of closes.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Whether the history holds no closes at all.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// The most recent close.
    pub fn last(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// A view over all closes.
    pub fn closes(&self) -> ArrayView1<'_, f64> {
        self.closes.view()
    }

    /// The last `n` closes (or all of them if fewer exist).
    pub fn tail(&self, n: usize) -> ArrayView1<'_, f64> {
        let start = self.len().saturating_sub(n);
        self.closes.slice(s![start..])
    }

    /// Simple moving average of the last `window` closes.
    ///
    /// Returns `None` when fewer than `window` closes exist.
    pub fn sma(&self, window: usize) -> Option<f64> {
        if window == 0 || self.len() < window {
            return None;
        }
        self.tail(window).mean()
    }

    /// Close-to-close changes; one element shorter than the history.
    pub fn deltas(&self) -> Array1<f64> {
        if self.len() < 2 {
            return Array1::zeros(0);
        }
        &self.closes.slice(s![1..]) - &self.closes.slice(s![..-1])
    }
}

impl From<Vec<f64>> for PriceHistory {
    fn from(closes: Vec<f64>) -> Self {
        Self::new(closes)
    }
}

impl FromIterator<f64> for PriceHistory {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            closes: iter.into_iter().collect(),
        }
    }
}

/// Fundamental and price snapshot for one ticker.
///
/// Ratios are plain fractions: a debt/equity of 0.8 means 80%, a revenue
/// growth of 0.12 means 12%.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFinancials {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Company long name.
    pub long_name: Option<String>,
    /// Sector classification.
    pub sector: Option<String>,

    /// Trailing twelve-month price/earnings.
    pub trailing_pe: Option<f64>,
    /// Forward price/earnings, used as P/E benchmark when the industry P/E is unknown.
    pub forward_pe: Option<f64>,
    /// Industry average price/earnings.
    pub industry_pe: Option<f64>,
    /// Price/book.
    pub price_to_book: Option<f64>,
    /// Industry average price/book.
    pub industry_pb: Option<f64>,
    /// Trailing twelve-month price/sales.
    pub price_to_sales: Option<f64>,
    /// Industry average price/sales.
    pub industry_ps: Option<f64>,
    /// Enterprise value / EBITDA.
    pub ev_to_ebitda: Option<f64>,

    /// Free cash flow (absolute currency units).
    pub free_cash_flow: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Cash and short-term investments.
    pub total_cash: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,

    /// Debt/equity as a plain ratio.
    pub debt_to_equity: Option<f64>,
    /// Current assets / current liabilities.
    pub current_ratio: Option<f64>,
    /// Year-over-year revenue growth.
    pub revenue_growth: Option<f64>,
    /// Year-over-year earnings growth.
    pub earnings_growth: Option<f64>,

    /// Trailing twelve-month earnings per share.
    pub trailing_eps: Option<f64>,
    /// EBITDA.
    pub ebitda: Option<f64>,
    /// Interest expense.
    pub interest_expense: Option<f64>,

    /// Daily closes, oldest first.
    pub prices: PriceHistory,
}

impl RawFinancials {
    /// Creates a snapshot with only a ticker and its price history.
    #[must_use]
    pub fn new(ticker: impl Into<Symbol>, prices: PriceHistory) -> Self {
        Self {
            ticker: ticker.into(),
            prices,
            ..Default::default()
        }
    }

    /// Last close, if any price history exists.
    pub fn current_price(&self) -> Option<f64> {
        self.prices.last()
    }

    /// The long name, or the ticker when the name is unknown.
    pub fn display_name(&self) -> &str {
        self.long_name.as_deref().unwrap_or(&self.ticker)
    }

    /// The sector, or `"N/A"` when unknown.
    pub fn sector_label(&self) -> &str {
        self.sector.as_deref().unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_history_basics() {
        let prices = PriceHistory::new(vec![10.0, 11.0, 12.0, 13.0]);
        assert_eq!(prices.len(), 4);
        assert!(!prices.is_empty());
        assert_eq!(prices.last(), Some(13.0));
        assert_eq!(prices.tail(2).to_vec(), vec![12.0, 13.0]);
        assert_eq!(prices.tail(10).len(), 4);
    }

    #[test]
    fn test_sma() {
        let prices: PriceHistory = (1..=10).map(f64::from).collect();
        assert_relative_eq!(prices.sma(4).unwrap(), 8.5);
        assert_relative_eq!(prices.sma(10).unwrap(), 5.5);
        assert!(prices.sma(11).is_none());
        assert!(prices.sma(0).is_none());
    }

    #[test]
    fn test_deltas() {
        let prices = PriceHistory::new(vec![10.0, 12.0, 11.0]);
        assert_eq!(prices.deltas().to_vec(), vec![2.0, -1.0]);
        assert!(PriceHistory::new(vec![5.0]).deltas().is_empty());
        assert!(PriceHistory::default().deltas().is_empty());
    }

    #[test]
    fn test_raw_financials_labels() {
        let mut data = RawFinancials::new("MSFT", PriceHistory::new(vec![400.0]));
        assert_eq!(data.display_name(), "MSFT");
        assert_eq!(data.sector_label(), "N/A");
        assert_eq!(data.current_price(), Some(400.0));

        data.long_name = Some("Microsoft Corporation".into());
        data.sector = Some("Technology".into());
        assert_eq!(data.display_name(), "Microsoft Corporation");
        assert_eq!(data.sector_label(), "Technology");
    }
}
