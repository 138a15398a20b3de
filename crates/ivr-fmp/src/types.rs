//! Data types for FMP API responses.
//!
//! Every numeric field is optional: FMP omits or nulls fields freely, and a
//! missing value must reach the scoring model as `None` rather than 0.

use chrono::NaiveDate;
use ivr_traits::{PriceHistory, RawFinancials};
use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Company profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market cap.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// 50-day average price.
    #[serde(default)]
    pub price_avg50: Option<f64>,
    /// 200-day average price.
    #[serde(default)]
    pub price_avg200: Option<f64>,
}

/// Trailing twelve-month ratios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatiosTtm {
    /// Price/earnings.
    #[serde(rename = "priceToEarningsRatioTTM", default)]
    pub price_to_earnings: Option<f64>,
    /// Price/book.
    #[serde(rename = "priceToBookRatioTTM", default)]
    pub price_to_book: Option<f64>,
    /// Price/sales.
    #[serde(rename = "priceToSalesRatioTTM", default)]
    pub price_to_sales: Option<f64>,
    /// Debt/equity as a plain ratio.
    #[serde(rename = "debtToEquityRatioTTM", default)]
    pub debt_to_equity: Option<f64>,
    /// Current ratio.
    #[serde(rename = "currentRatioTTM", default)]
    pub current_ratio: Option<f64>,
    /// Enterprise value / EBITDA.
    #[serde(rename = "enterpriseValueMultipleTTM", default)]
    pub enterprise_value_multiple: Option<f64>,
    /// Net income per share.
    #[serde(rename = "netIncomePerShareTTM", default)]
    pub net_income_per_share: Option<f64>,
}

/// Trailing twelve-month key metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyMetricsTtm {
    /// Market capitalization.
    #[serde(rename = "marketCap", default)]
    pub market_cap: Option<f64>,
    /// Enterprise value.
    #[serde(rename = "enterpriseValueTTM", default)]
    pub enterprise_value: Option<f64>,
    /// Enterprise value / EBITDA.
    #[serde(rename = "evToEBITDATTM", default)]
    pub ev_to_ebitda: Option<f64>,
    /// Current ratio.
    #[serde(rename = "currentRatioTTM", default)]
    pub current_ratio: Option<f64>,
}

/// Year-over-year growth rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGrowth {
    /// Fiscal period end date.
    #[serde(default)]
    pub date: Option<String>,
    /// Revenue growth.
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    /// Net income growth.
    #[serde(default)]
    pub net_income_growth: Option<f64>,
    /// EPS growth.
    #[serde(rename = "epsgrowth", default)]
    pub eps_growth: Option<f64>,
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Fiscal period end date.
    #[serde(default)]
    pub date: Option<String>,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
    /// EBITDA.
    #[serde(default)]
    pub ebitda: Option<f64>,
    /// Interest expense.
    #[serde(default)]
    pub interest_expense: Option<f64>,
    /// Earnings per share (diluted).
    #[serde(default)]
    pub eps_diluted: Option<f64>,
    /// Weighted average shares outstanding.
    #[serde(default)]
    pub weighted_average_shs_out: Option<f64>,
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Fiscal period end date.
    #[serde(default)]
    pub date: Option<String>,
    /// Total debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Cash and short-term investments.
    #[serde(default)]
    pub cash_and_short_term_investments: Option<f64>,
    /// Total current assets.
    #[serde(default)]
    pub total_current_assets: Option<f64>,
    /// Total current liabilities.
    #[serde(default)]
    pub total_current_liabilities: Option<f64>,
    /// Total stockholders' equity.
    #[serde(default)]
    pub total_stockholders_equity: Option<f64>,
}

impl BalanceSheet {
    /// Debt/equity from the statement, when equity is positive.
    #[must_use]
    pub fn debt_to_equity(&self) -> Option<f64> {
        let equity = self.total_stockholders_equity.filter(|e| *e > 0.0)?;
        Some(self.total_debt? / equity)
    }

    /// Current assets / current liabilities.
    #[must_use]
    pub fn current_ratio(&self) -> Option<f64> {
        let liabilities = self.total_current_liabilities.filter(|l| *l > 0.0)?;
        Some(self.total_current_assets? / liabilities)
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Fiscal period end date.
    #[serde(default)]
    pub date: Option<String>,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure.
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

/// Industry P/E snapshot for one exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryPe {
    /// Snapshot date.
    #[serde(default)]
    pub date: Option<String>,
    /// Industry name.
    #[serde(default)]
    pub industry: Option<String>,
    /// Exchange.
    #[serde(default)]
    pub exchange: Option<String>,
    /// Average P/E.
    #[serde(default)]
    pub pe: Option<f64>,
}

/// Historical daily price from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: Option<f64>,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Everything fetched for one symbol.
///
/// Any endpoint except the price history may be missing.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Ticker symbol.
    pub symbol: String,
    /// Company profile.
    pub profile: Option<Profile>,
    /// Current quote.
    pub quote: Option<Quote>,
    /// TTM ratios.
    pub ratios: Option<RatiosTtm>,
    /// TTM key metrics.
    pub metrics: Option<KeyMetricsTtm>,
    /// Latest annual growth.
    pub growth: Option<FinancialGrowth>,
    /// Latest annual income statement.
    pub income: Option<IncomeStatement>,
    /// Latest annual balance sheet.
    pub balance: Option<BalanceSheet>,
    /// Latest annual cash flow statement.
    pub cash_flow: Option<CashFlowStatement>,
    /// Average industry P/E across exchanges.
    pub industry_pe: Option<f64>,
    /// Daily prices, oldest first.
    pub prices: Vec<HistoricalPrice>,
}

impl Snapshot {
    /// Shares outstanding: weighted average from the income statement,
    /// else market cap over price.
    #[must_use]
    pub fn shares_outstanding(&self) -> Option<f64> {
        let reported = self
            .income
            .as_ref()
            .and_then(|i| i.weighted_average_shs_out)
            .filter(|s| *s > 0.0);
        reported.or_else(|| {
            let quote = self.quote.as_ref()?;
            let price = quote.price.filter(|p| *p > 0.0)?;
            Some(quote.market_cap? / price)
        })
    }

    /// Converts into the scoring model's snapshot type.
    #[must_use]
    pub fn into_raw_financials(self) -> RawFinancials {
        let shares_outstanding = self.shares_outstanding();
        let Self {
            symbol,
            profile,
            quote,
            ratios,
            metrics,
            growth,
            income,
            balance,
            cash_flow,
            industry_pe,
            prices,
        } = self;

        let profile = profile.unwrap_or_default();
        let ratios = ratios.unwrap_or_default();
        let metrics = metrics.unwrap_or_default();
        let growth = growth.unwrap_or_default();
        let income = income.unwrap_or_default();
        let balance = balance.unwrap_or_default();
        let cash_flow = cash_flow.unwrap_or_default();

        let earnings_growth = growth.eps_growth.or(growth.net_income_growth);

        RawFinancials {
            ticker: symbol,
            long_name: profile
                .company_name
                .or_else(|| quote.and_then(|q| q.name)),
            sector: profile.sector.filter(|s| !s.is_empty()),
            trailing_pe: ratios.price_to_earnings,
            forward_pe: None,
            industry_pe,
            price_to_book: ratios.price_to_book,
            industry_pb: None,
            price_to_sales: ratios.price_to_sales,
            industry_ps: None,
            ev_to_ebitda: metrics
                .ev_to_ebitda
                .or(ratios.enterprise_value_multiple),
            free_cash_flow: cash_flow.free_cash_flow,
            total_debt: balance.total_debt,
            total_cash: balance.cash_and_short_term_investments,
            shares_outstanding,
            debt_to_equity: ratios.debt_to_equity.or_else(|| balance.debt_to_equity()),
            current_ratio: ratios
                .current_ratio
                .or(metrics.current_ratio)
                .or_else(|| balance.current_ratio()),
            revenue_growth: growth.revenue_growth,
            earnings_growth,
            trailing_eps: ratios.net_income_per_share.or(income.eps_diluted),
            ebitda: income.ebitda,
            interest_expense: income.interest_expense,
            prices: prices.iter().map(|p| p.close).collect::<PriceHistory>(),
        }
    }
}
