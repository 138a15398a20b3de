//! Schedule command implementation.

use std::time::Duration;

use anyhow::{Result, ensure};
use chrono::{Local, NaiveDateTime};
use ivr_report::{AlertDigest, AlertMailer, HistoryWriter, SignalThresholds};
use ivr_screen::{ScoringModel, ScreeningEngine};
use ivr_traits::ScreeningRun;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::cmd::{banner, truncate};
use crate::config::AppConfig;
use crate::data;

/// Headline numbers of one scheduled run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunSummary {
    pub(crate) total: usize,
    pub(crate) passing: usize,
    pub(crate) buys: usize,
    pub(crate) sells: usize,
    /// `(ticker, name, ivr, passes_filter)` of the best three.
    pub(crate) top: Vec<(String, String, f64, bool)>,
}

impl RunSummary {
    pub(crate) fn new(run: &ScreeningRun, thresholds: &SignalThresholds) -> Self {
        let digest = AlertDigest::from_run(run, thresholds);
        Self {
            total: run.len(),
            passing: run.passing().count(),
            buys: digest.buys.len(),
            sells: digest.sells.len(),
            top: run
                .top(3)
                .iter()
                .map(|e| (e.ticker.clone(), e.name.clone(), e.ivr, e.passes_filter))
                .collect(),
        }
    }

    fn print(&self) {
        println!("Tickers analyzed: {}", self.total);
        println!("Passing filter:   {}", self.passing);
        println!("Buy signals:      {}", self.buys);
        println!("Sell signals:     {}", self.sells);
        if !self.top.is_empty() {
            println!("\nTop 3:");
            for (ticker, name, ivr, passed) in &self.top {
                let mark = if *passed { "✓" } else { "✗" };
                println!(
                    "  {mark} {ticker:<6} IVR {:>6.2}%  {}",
                    ivr * 100.0,
                    truncate(name, 30)
                );
            }
        }
        println!();
    }
}

struct Scheduler {
    engine: ScreeningEngine,
    tickers: Vec<String>,
    thresholds: SignalThresholds,
    history: Option<HistoryWriter>,
    mailer: Option<AlertMailer>,
}

impl Scheduler {
    fn new(config: &AppConfig) -> Result<Self> {
        let engine = data::build_engine(config, ScoringModel::new(config.model_config()))?;
        let tickers = data::select_tickers(None, config)?;
        Ok(Self {
            engine,
            tickers,
            thresholds: config.thresholds,
            history: config
                .save_history
                .then(|| HistoryWriter::new(&config.history_dir)),
            mailer: config
                .send_alerts
                .then(|| AlertMailer::new(config.email.clone(), config.thresholds)),
        })
    }

    async fn run_once(&self) {
        let now = Local::now().naive_local();
        println!("{}", "━".repeat(64));
        println!(
            "Running screener - {} ({} tickers)",
            now.format("%Y-%m-%d %H:%M:%S"),
            self.tickers.len()
        );
        println!("{}\n", "━".repeat(64));

        let run = self.engine.score_many(self.tickers.as_slice()).await;
        if run.is_empty() {
            warn!("No ticker could be scored, skipping history and alerts");
            return;
        }
        RunSummary::new(&run, &self.thresholds).print();

        if let Some(history) = &self.history {
            match history.append(&run, now) {
                Ok(path) => println!("History saved to {}", path.display()),
                Err(e) => warn!(error = %e, "Failed to save history"),
            }
        }

        if let Some(mailer) = &self.mailer {
            self.send_alert(mailer.clone(), run, now).await;
        }
    }

    async fn send_alert(&self, mailer: AlertMailer, run: ScreeningRun, now: NaiveDateTime) {
        match tokio::task::spawn_blocking(move || mailer.send_digest(&run, now)).await {
            Ok(Ok(true)) => println!("Alert e-mail sent"),
            Ok(Ok(false)) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to send alert"),
            Err(e) => warn!(error = %e, "Alert task failed"),
        }
    }
}

/// Run the screener now and then every `interval` minutes until Ctrl-C.
pub(crate) async fn run_schedule(
    config: &AppConfig,
    interval: Option<u64>,
    once: bool,
) -> Result<()> {
    let minutes = interval.unwrap_or(config.interval_minutes);
    ensure!(minutes > 0, "Interval must be at least one minute");

    let scheduler = Scheduler::new(config)?;

    banner("IVR Scheduler");
    println!("Tickers:      {}", scheduler.tickers.len());
    println!("Interval:     {minutes} min");
    println!("History:      {}", if config.save_history { "on" } else { "off" });
    println!("Alerts:       {}", if config.send_alerts { "on" } else { "off" });
    println!();

    if once {
        scheduler.run_once().await;
        return Ok(());
    }

    println!("Press Ctrl-C to stop.\n");
    let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            _ = &mut shutdown => break,
            () = scheduler.run_once() => {}
        }
        info!(minutes, "Next run scheduled");
    }

    println!("\nScheduler stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivr_traits::ScoreBreakdown;

    fn entry(ticker: &str, ivr: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            ticker: ticker.to_string(),
            name: format!("{ticker} Corp"),
            sector: "N/A".to_string(),
            price: 10.0,
            intrinsic_value: 0.0,
            margin_of_safety: 0.0,
            ivr,
            valuation_score: 0.0,
            quality_score: 0.0,
            timing_score: 0.0,
            rsi: 50.0,
            passes_filter: ivr > 0.0,
            filter_reason: String::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let run = ScreeningRun::rank(vec![
            entry("A", 0.0),
            entry("B", 0.65),
            entry("C", 0.50),
            entry("D", 0.20),
            entry("E", 0.0),
        ]);
        let summary = RunSummary::new(&run, &SignalThresholds::default());

        assert_eq!(summary.total, 5);
        assert_eq!(summary.passing, 3);
        assert_eq!(summary.buys, 1);
        assert_eq!(summary.sells, 3);

        let top: Vec<&str> = summary.top.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(top, vec!["B", "C", "D"]);
        assert!(summary.top.iter().all(|t| t.3));
    }

    #[test]
    fn test_summary_short_run() {
        let run = ScreeningRun::rank(vec![entry("A", 0.0)]);
        let summary = RunSummary::new(&run, &SignalThresholds::default());
        assert_eq!(summary.top.len(), 1);
        assert!(!summary.top[0].3);
    }
}
