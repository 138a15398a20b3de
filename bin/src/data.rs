//! Engine construction for the CLI.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use ivr_fmp::FmpClient;
use ivr_screen::{ScoringModel, ScreeningEngine, resolve_tickers};

use crate::config::AppConfig;

/// Builds a screening engine backed by Financial Modeling Prep.
pub(crate) fn build_engine(config: &AppConfig, model: ScoringModel) -> Result<ScreeningEngine> {
    let client = FmpClient::from_env().context("Cannot create the FMP data provider")?;
    Ok(ScreeningEngine::new(
        Arc::new(client),
        model,
        config.engine.clone(),
    ))
}

/// Tickers named on the command line, or the configured watchlist.
pub(crate) fn select_tickers(input: Option<&str>, config: &AppConfig) -> Result<Vec<String>> {
    let tickers = match input {
        Some(input) => resolve_tickers(input),
        None => resolve_tickers(&config.tickers.join(",")),
    };
    if tickers.is_empty() {
        bail!("No tickers to screen");
    }
    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_from_universe() {
        let config = AppConfig::default();
        let tickers = select_tickers(Some("dow_30"), &config).unwrap();
        assert_eq!(tickers.len(), 30);
    }

    #[test]
    fn test_select_from_list() {
        let config = AppConfig::default();
        let tickers = select_tickers(Some("ko, pep,KO"), &config).unwrap();
        assert_eq!(tickers, vec!["KO", "PEP"]);
    }

    #[test]
    fn test_select_defaults_to_watchlist() {
        let config = AppConfig {
            tickers: vec!["msft".to_string(), "aapl".to_string()],
            ..AppConfig::default()
        };
        assert_eq!(select_tickers(None, &config).unwrap(), vec!["MSFT", "AAPL"]);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let config = AppConfig::default();
        assert!(select_tickers(Some(" , "), &config).is_err());
    }
}
