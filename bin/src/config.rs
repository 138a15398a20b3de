//! JSON configuration file for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ivr_combine::{AggregatorConfig, SafetyFilterConfig, WeightConfig};
use ivr_report::{EmailConfig, SignalThresholds};
use ivr_screen::{EngineConfig, ModelConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable that overrides the configured SMTP password.
pub(crate) const SMTP_PASSWORD_VAR: &str = "IVR_SMTP_PASSWORD";

/// Watchlist used when the configuration names no tickers.
pub(crate) const DEFAULT_TICKERS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", // Technology
    "JPM", "BAC", "WFC", "GS", "MS", // Financials
    "WMT", "HD", "NKE", "SBUX", "MCD", // Consumer
    "JNJ", "UNH", "PFE", "ABBV", "TMO", // Healthcare
    "CAT", "BA", "HON", "UPS", "GE", // Industrials
];

/// Everything the CLI reads from `ivr.json`.
///
/// Every field is optional in the file; a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Watchlist for `schedule` and for `scan` without arguments.
    pub(crate) tickers: Vec<String>,

    /// Sub-score weights.
    pub(crate) weights: WeightConfig,

    /// Buy/sell thresholds.
    pub(crate) thresholds: SignalThresholds,

    /// Normalizer parameters.
    pub(crate) signals: AggregatorConfig,

    /// Safety filter thresholds.
    pub(crate) filter: SafetyFilterConfig,

    /// Minutes between scheduled runs.
    pub(crate) interval_minutes: u64,

    /// Whether scheduled runs are appended to the history.
    pub(crate) save_history: bool,

    /// Directory for the daily history files.
    pub(crate) history_dir: PathBuf,

    /// Whether scheduled runs e-mail their buy/sell digest.
    pub(crate) send_alerts: bool,

    /// SMTP settings.
    pub(crate) email: EmailConfig,

    /// Concurrency, timeout and retry settings.
    pub(crate) engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| (*t).to_string()).collect(),
            weights: WeightConfig::default(),
            thresholds: SignalThresholds::default(),
            signals: AggregatorConfig::default(),
            filter: SafetyFilterConfig::default(),
            interval_minutes: 30,
            save_history: true,
            history_dir: PathBuf::from("history"),
            send_alerts: true,
            email: EmailConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when it does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<Self>(&text)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Self::default()
        };
        config.apply_env(std::env::var(SMTP_PASSWORD_VAR).ok());
        Ok(config)
    }

    /// Writes the configuration as pretty JSON. The SMTP password is never
    /// written.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn apply_env(&mut self, password: Option<String>) {
        if let Some(password) = password
            && !password.is_empty()
        {
            self.email.password = password;
        }
    }

    /// Scoring model parameters.
    pub(crate) fn model_config(&self) -> ModelConfig {
        ModelConfig {
            weights: self.weights,
            signals: self.signals.clone(),
            filter: self.filter.clone(),
        }
    }
}
