//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{
        BalanceSheet, CashFlowStatement, FinancialGrowth, HistoricalPrice, IncomeStatement,
        IndustryPe, KeyMetricsTtm, Period, Profile, Quote, RatiosTtm, Snapshot,
    },
};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use ivr_traits::{DataProvider, RawFinancials};
use reqwest::Client;
use std::env;
use tracing::debug;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Calendar days of price history requested per symbol (covers 200+ sessions).
const HISTORY_DAYS: u64 = 400;

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if status.is_server_error() {
            return Err(FmpError::Server(status.as_u16()));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)?;
        if let Some(message) = api_error(&body) {
            return Err(FmpError::Api(message));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// GET an endpoint that returns an array and keep its first element.
    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        symbol: &str,
    ) -> Result<T> {
        let items: Vec<T> = self.get(endpoint).await?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::NoData(format!("{endpoint} for {symbol}")))
    }

    /// Get the company profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn profile(&self, symbol: &str) -> Result<Profile> {
        let endpoint = format!("profile?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol)
            .await
            .map_err(|e| match e {
                FmpError::NoData(_) => FmpError::SymbolNotFound(symbol.to_string()),
                other => other,
            })
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get trailing twelve-month ratios.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn ratios_ttm(&self, symbol: &str) -> Result<RatiosTtm> {
        let endpoint = format!("ratios-ttm?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get trailing twelve-month key metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn key_metrics_ttm(&self, symbol: &str) -> Result<KeyMetricsTtm> {
        let endpoint = format!("key-metrics-ttm?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get the most recent growth figures for a period type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn financial_growth(&self, symbol: &str, period: Period) -> Result<FinancialGrowth> {
        let endpoint = format!(
            "financial-growth?symbol={}&period={}&limit=1",
            symbol.to_uppercase(),
            period.as_str()
        );
        self.first(&endpoint, symbol).await
    }

    /// Get the most recent income statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(&self, symbol: &str, period: Period) -> Result<IncomeStatement> {
        let endpoint = format!(
            "income-statement?symbol={}&period={}&limit=1",
            symbol.to_uppercase(),
            period.as_str()
        );
        self.first(&endpoint, symbol).await
    }

    /// Get the most recent balance sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(&self, symbol: &str, period: Period) -> Result<BalanceSheet> {
        let endpoint = format!(
            "balance-sheet-statement?symbol={}&period={}&limit=1",
            symbol.to_uppercase(),
            period.as_str()
        );
        self.first(&endpoint, symbol).await
    }

    /// Get the most recent cash flow statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(&self, symbol: &str, period: Period) -> Result<CashFlowStatement> {
        let endpoint = format!(
            "cash-flow-statement?symbol={}&period={}&limit=1",
            symbol.to_uppercase(),
            period.as_str()
        );
        self.first(&endpoint, symbol).await
    }

    /// Average P/E of an industry across exchanges on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no exchange reports a
    /// positive P/E.
    pub async fn industry_pe(&self, industry: &str, date: NaiveDate) -> Result<f64> {
        let endpoint = format!(
            "industry-pe-snapshot?date={}&industry={}",
            date.format("%Y-%m-%d"),
            industry.replace('&', "%26").replace(' ', "%20")
        );
        let rows: Vec<IndustryPe> = self.get(&endpoint).await?;
        average_positive(rows.iter().filter_map(|r| r.pe))
            .ok_or_else(|| FmpError::NoData(format!("industry P/E for {industry}")))
    }

    /// Get historical daily prices for a symbol, oldest first.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - Start date
    /// * `to` - End date
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HistoricalPrice>> {
        let endpoint = format!(
            "historical-price-eod/full?symbol={}&from={}&to={}",
            symbol.to_uppercase(),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        );
        // The stable API returns a flat array, newest first
        let mut prices: Vec<HistoricalPrice> = self.get(&endpoint).await?;
        prices.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(prices)
    }

    /// Fetch everything the scoring model needs for one symbol.
    ///
    /// The price history is mandatory. Other endpoints degrade to missing
    /// fields, except that a rate limit anywhere aborts the snapshot so the
    /// caller can back off.
    ///
    /// # Errors
    ///
    /// Returns an error if the price request fails, the history is empty, or
    /// any request is rate limited.
    pub async fn snapshot(&self, symbol: &str) -> Result<Snapshot> {
        let to = Utc::now().date_naive();
        let from = to.checked_sub_days(Days::new(HISTORY_DAYS)).unwrap_or(to);

        let (prices, profile, quote, ratios, metrics, growth, income, balance, cash_flow) = tokio::join!(
            self.historical_prices(symbol, from, to),
            self.profile(symbol),
            self.quote(symbol),
            self.ratios_ttm(symbol),
            self.key_metrics_ttm(symbol),
            self.financial_growth(symbol, Period::Annual),
            self.income_statement(symbol, Period::Annual),
            self.balance_sheet(symbol, Period::Annual),
            self.cash_flow(symbol, Period::Annual),
        );

        let prices = prices?;
        if prices.is_empty() {
            return Err(FmpError::NoData(format!("price history for {symbol}")));
        }

        let profile = optional(symbol, "profile", profile)?;
        let industry_pe = match profile.as_ref().and_then(|p| p.industry.as_deref()) {
            Some(industry) if !industry.is_empty() => {
                let date = prices
                    .last()
                    .and_then(HistoricalPrice::parsed_date)
                    .unwrap_or(to);
                optional(symbol, "industry-pe", self.industry_pe(industry, date).await)?
            }
            _ => None,
        };

        Ok(Snapshot {
            symbol: symbol.to_uppercase(),
            profile,
            quote: optional(symbol, "quote", quote)?,
            ratios: optional(symbol, "ratios-ttm", ratios)?,
            metrics: optional(symbol, "key-metrics-ttm", metrics)?,
            growth: optional(symbol, "financial-growth", growth)?,
            income: optional(symbol, "income-statement", income)?,
            balance: optional(symbol, "balance-sheet", balance)?,
            cash_flow: optional(symbol, "cash-flow", cash_flow)?,
            industry_pe,
            prices,
        })
    }
}

#[async_trait]
impl DataProvider for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch(&self, symbol: &str) -> ivr_traits::Result<RawFinancials> {
        let snapshot = self.snapshot(symbol).await?;
        Ok(snapshot.into_raw_financials())
    }
}

/// The message of an FMP error body: a top-level object carrying an
/// `Error Message` or `error` key. Data payloads are never objects with
/// those keys, whatever their string fields contain.
fn api_error(body: &serde_json::Value) -> Option<String> {
    let object = body.as_object()?;
    let message = object.get("Error Message").or_else(|| object.get("error"))?;
    Some(
        message
            .as_str()
            .map_or_else(|| message.to_string(), str::to_string),
    )
}

/// Keeps a successful response, drops any other failure to `None`, and
/// propagates rate limiting.
fn optional<T>(symbol: &str, endpoint: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FmpError::RateLimitExceeded) => Err(FmpError::RateLimitExceeded),
        Err(e) => {
            debug!(ticker = %symbol, endpoint, error = %e, "Optional endpoint unavailable");
            Ok(None)
        }
    }
}

fn average_positive(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("quote?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/quote?symbol=AAPL&apikey=test_key"
        );
        assert_eq!(
            client.url("ratios-ttm?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/ratios-ttm?symbol=AAPL&apikey=test_key"
        );
    }

    #[test]
    fn test_api_error_body() {
        let body = serde_json::json!({"Error Message": "Invalid API KEY."});
        assert_eq!(api_error(&body).as_deref(), Some("Invalid API KEY."));

        let body = serde_json::json!({"error": {"code": 401}});
        assert_eq!(api_error(&body).as_deref(), Some(r#"{"code":401}"#));
    }

    #[test]
    fn test_profile_mentioning_error_is_data() {
        let body = serde_json::json!([{
            "symbol": "ERR",
            "companyName": "Error Corp",
            "description": "Makes \"error\" correction codes; see the \"Error Message\" field."
        }]);
        assert_eq!(api_error(&body), None);
        assert_eq!(api_error(&serde_json::json!([])), None);
        assert_eq!(api_error(&serde_json::json!({"symbol": "KO"})), None);
    }

    #[test]
    fn test_optional_endpoint() {
        let ok: Result<u32> = Ok(7);
        assert_eq!(optional("X", "quote", ok).unwrap(), Some(7));

        let missing: Result<u32> = Err(FmpError::NoData("X".into()));
        assert_eq!(optional("X", "quote", missing).unwrap(), None);

        let limited: Result<u32> = Err(FmpError::RateLimitExceeded);
        assert!(matches!(
            optional("X", "quote", limited),
            Err(FmpError::RateLimitExceeded)
        ));
    }

    #[test]
    fn test_average_positive() {
        assert_relative_eq!(
            average_positive([20.0, 30.0, -5.0, 0.0].into_iter()).unwrap(),
            25.0
        );
        assert!(average_positive([-1.0, f64::NAN].into_iter()).is_none());
        assert!(average_positive(std::iter::empty()).is_none());
    }

    #[test]
    fn test_provider_name() {
        let client = FmpClient::new("k");
        assert_eq!(DataProvider::name(&client), "fmp");
    }
}
