//! Concurrent fetch, score and rank.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ivr_traits::{DataProvider, IvrError, RawFinancials, Result, ScoreBreakdown, ScreeningRun};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::model::ScoringModel;
use crate::retry::RetryPolicy;

/// Configuration for the screening engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of tickers fetched at once (default: 8)
    pub concurrency: usize,

    /// Timeout for a single fetch attempt in milliseconds (default: 20000)
    pub fetch_timeout_ms: u64,

    /// Backoff schedule for recoverable failures
    pub retry: RetryPolicy,
}

impl EngineConfig {
    /// Per-attempt fetch timeout.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            fetch_timeout_ms: 20_000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Fetches snapshots from a [`DataProvider`] and scores them.
///
/// Cloning is cheap: the provider and the model are shared.
#[derive(Clone)]
pub struct ScreeningEngine {
    provider: Arc<dyn DataProvider>,
    model: Arc<ScoringModel>,
    config: EngineConfig,
}

impl fmt::Debug for ScreeningEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningEngine")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("config", &self.config)
            .finish()
    }
}

impl ScreeningEngine {
    /// Create an engine around a provider and a scoring model.
    pub fn new(provider: Arc<dyn DataProvider>, model: ScoringModel, config: EngineConfig) -> Self {
        Self {
            provider,
            model: Arc::new(model),
            config,
        }
    }

    /// The scoring model.
    pub fn model(&self) -> &ScoringModel {
        &self.model
    }

    /// The engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the underlying data provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Scores an already fetched snapshot. Never touches the provider.
    pub fn score_snapshot(&self, data: &RawFinancials) -> ScoreBreakdown {
        self.model.evaluate(data)
    }

    /// Fetches a snapshot with the per-attempt timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns the last provider error once retries are exhausted, or
    /// immediately for non-recoverable errors. A snapshot without prices is
    /// `DataUnavailable`.
    pub async fn fetch(&self, symbol: &str) -> Result<RawFinancials> {
        let timeout = self.config.fetch_timeout();
        let policy = self.config.retry;
        let mut attempt = 0;

        loop {
            let result = match tokio::time::timeout(timeout, self.provider.fetch(symbol)).await {
                Ok(result) => result,
                Err(_) => Err(IvrError::Timeout(
                    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                )),
            };

            match result {
                Ok(data) if data.prices.is_empty() => {
                    return Err(IvrError::DataUnavailable(format!(
                        "No price history for {symbol}"
                    )));
                }
                Ok(data) => return Ok(data),
                Err(e) if e.is_recoverable() && attempt < policy.max_retries => {
                    let delay = policy.delay(attempt);
                    attempt += 1;
                    debug!(
                        ticker = %symbol,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Retrying fetch"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetches and scores one ticker.
    ///
    /// Any fetch failure is logged and yields `None`; callers skip the
    /// ticker rather than abort.
    pub async fn score_one(&self, symbol: &str) -> Option<ScoreBreakdown> {
        match self.fetch(symbol).await {
            Ok(data) => {
                let breakdown = self.model.evaluate(&data);
                debug!(
                    ticker = %symbol,
                    ivr = breakdown.ivr,
                    passes = breakdown.passes_filter,
                    "Scored"
                );
                Some(breakdown)
            }
            Err(e) => {
                warn!(ticker = %symbol, error = %e, "Skipping ticker");
                None
            }
        }
    }

    /// Scores every ticker and ranks the results.
    ///
    /// At most `concurrency` fetches run at once. Failed tickers are
    /// dropped; the rest are sorted by descending IVR with ties in input
    /// order. An empty input or a batch where everything fails yields an
    /// empty run.
    pub async fn score_many<S: AsRef<str>>(&self, tickers: &[S]) -> ScreeningRun {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, ticker) in tickers.iter().enumerate() {
            let engine = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let ticker = ticker.as_ref().to_string();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                engine.score_one(&ticker).await.map(|b| (index, b))
            });
        }

        let mut scored = Vec::with_capacity(tickers.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(entry)) => scored.push(entry),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Scoring task failed"),
            }
        }

        // Restore input order so the stable ranking breaks ties by it.
        scored.sort_by_key(|(index, _)| *index);
        let run = ScreeningRun::rank(scored.into_iter().map(|(_, b)| b).collect());

        info!(
            requested = tickers.len(),
            scored = run.len(),
            passing = run.passing().count(),
            provider = self.provider.name(),
            "Screening run complete"
        );
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ivr_traits::PriceHistory;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves fixed snapshots; unknown tickers fail with `DataUnavailable`.
    struct MockProvider {
        snapshots: HashMap<String, RawFinancials>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(snapshots: Vec<RawFinancials>) -> Self {
            Self {
                snapshots: snapshots
                    .into_iter()
                    .map(|s| (s.ticker.clone(), s))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DataProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn fetch(&self, symbol: &str) -> Result<RawFinancials> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.snapshots
                .get(symbol)
                .cloned()
                .ok_or_else(|| IvrError::DataUnavailable(symbol.to_string()))
        }
    }

    /// Fails with a recoverable error a fixed number of times first.
    struct FlakyProvider {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DataProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn fetch(&self, symbol: &str) -> Result<RawFinancials> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(IvrError::DataFetch("connection reset".into()));
            }
            Ok(approved(symbol, 150.0))
        }
    }

    /// Never answers within the engine timeout.
    struct SlowProvider;

    #[async_trait]
    impl DataProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch(&self, symbol: &str) -> Result<RawFinancials> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(approved(symbol, 150.0))
        }
    }

    /// Records the peak number of fetches running at once.
    #[derive(Default)]
    struct CountingProvider {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl DataProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch(&self, symbol: &str) -> Result<RawFinancials> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(approved(symbol, 150.0))
        }
    }

    /// A snapshot that passes the filter; lower prices give higher IVR.
    fn approved(ticker: &str, price: f64) -> RawFinancials {
        RawFinancials {
            trailing_eps: Some(2.5),
            trailing_pe: Some(15.0),
            industry_pe: Some(20.0),
            free_cash_flow: Some(1e9),
            earnings_growth: Some(0.10),
            total_debt: Some(0.0),
            total_cash: Some(2e9),
            shares_outstanding: Some(1e8),
            ..RawFinancials::new(ticker, PriceHistory::new(vec![price]))
        }
    }

    /// A snapshot the filter rejects (IVR exactly 0).
    fn rejected(ticker: &str) -> RawFinancials {
        RawFinancials {
            trailing_eps: Some(-1.0),
            ..approved(ticker, 150.0)
        }
    }

    fn fast_config() -> EngineConfig {
        EngineConfig {
            concurrency: 2,
            fetch_timeout_ms: 50,
            retry: RetryPolicy {
                max_retries: 2,
                base_delay_ms: 1,
                max_delay_ms: 4,
            },
        }
    }

    fn engine(provider: Arc<dyn DataProvider>) -> ScreeningEngine {
        ScreeningEngine::new(provider, ScoringModel::default(), fast_config())
    }

    #[tokio::test]
    async fn test_score_many_drops_failures_and_ranks() {
        let provider = Arc::new(MockProvider::new(vec![
            approved("AAA", 150.0),
            approved("BBB", 100.0),
            approved("CCC", 120.0),
        ]));
        let engine = engine(provider);

        let run = engine
            .score_many(&["AAA", "MISSING1", "BBB", "MISSING2", "CCC"])
            .await;

        let order: Vec<&str> = run.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(order, vec!["BBB", "CCC", "AAA"]);
        for pair in run.as_slice().windows(2) {
            assert!(pair[0].ivr >= pair[1].ivr);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_bounds_in_flight_fetches() {
        let provider = Arc::new(CountingProvider::default());
        let config = EngineConfig {
            concurrency: 3,
            fetch_timeout_ms: 5_000,
            ..fast_config()
        };
        let engine = ScreeningEngine::new(
            Arc::clone(&provider) as Arc<dyn DataProvider>,
            ScoringModel::default(),
            config,
        );

        let tickers: Vec<String> = (0..20).map(|i| format!("T{i:02}")).collect();
        let run = engine.score_many(tickers.as_slice()).await;

        assert_eq!(run.len(), 20);
        let peak = provider.peak.load(Ordering::SeqCst);
        assert!(peak >= 1);
        assert!(peak <= engine.config().concurrency, "peak was {peak}");
        assert_eq!(provider.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let provider = Arc::new(MockProvider::new(vec![
            rejected("ZZZ"),
            rejected("AAA"),
            approved("MMM", 150.0),
            rejected("BBB"),
        ]));
        let engine = engine(provider);

        let run = engine.score_many(&["ZZZ", "AAA", "MMM", "BBB"]).await;
        let order: Vec<&str> = run.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(order, vec!["MMM", "ZZZ", "AAA", "BBB"]);
    }

    #[tokio::test]
    async fn test_empty_and_all_failed() {
        let engine = engine(Arc::new(MockProvider::new(Vec::new())));

        let empty: [&str; 0] = [];
        assert!(engine.score_many(&empty).await.is_empty());
        assert!(engine.score_many(&["X", "Y"]).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_prices_is_unavailable() {
        let provider = Arc::new(MockProvider::new(vec![RawFinancials::new(
            "NOPX",
            PriceHistory::default(),
        )]));
        let engine = engine(provider);

        let err = engine.fetch("NOPX").await.unwrap_err();
        assert!(matches!(err, IvrError::DataUnavailable(_)));
        assert!(engine.score_one("NOPX").await.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_not_retried() {
        let provider = Arc::new(MockProvider::new(Vec::new()));
        let engine = engine(Arc::clone(&provider) as Arc<dyn DataProvider>);

        assert!(engine.score_one("GONE").await.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recoverable_errors_retried() {
        let provider = Arc::new(FlakyProvider {
            failures: 2,
            calls: AtomicUsize::new(0),
        });
        let engine = engine(Arc::clone(&provider) as Arc<dyn DataProvider>);

        assert!(engine.score_one("RETRY").await.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let provider = Arc::new(FlakyProvider {
            failures: 10,
            calls: AtomicUsize::new(0),
        });
        let engine = engine(Arc::clone(&provider) as Arc<dyn DataProvider>);

        assert!(engine.score_one("DOWN").await.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_timeout_skips_ticker() {
        let mut config = fast_config();
        config.retry = RetryPolicy::none();
        let engine = ScreeningEngine::new(Arc::new(SlowProvider), ScoringModel::default(), config);

        let err = engine.fetch("SLOW").await.unwrap_err();
        assert!(matches!(err, IvrError::Timeout(50)));
        assert!(engine.score_many(&["SLOW"]).await.is_empty());
    }

    #[tokio::test]
    async fn test_score_one_deterministic() {
        let provider = Arc::new(MockProvider::new(vec![approved("DET", 140.0)]));
        let engine = engine(provider);

        let first = engine.score_one("DET").await.unwrap();
        let second = engine.score_one("DET").await.unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first, engine.score_snapshot(&approved("DET", 140.0)));
    }
}
