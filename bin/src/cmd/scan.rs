//! Scan command implementation.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Local;
use ivr_combine::WeightConfig;
use ivr_report::{AlertDigest, HistoryWriter};
use ivr_screen::{ModelConfig, ScoringModel};
use ivr_traits::ScreeningRun;
use serde::Serialize;
use serde_json::json;

use crate::OutputFormat;
use crate::cmd::{banner, print_ranking, truncate};
use crate::config::AppConfig;
use crate::data;

/// Command-line weight overrides; unset weights keep their configured value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WeightOverrides {
    pub(crate) valuation: Option<f64>,
    pub(crate) quality: Option<f64>,
    pub(crate) timing: Option<f64>,
}

impl WeightOverrides {
    /// Applies the overrides on top of `base`, re-normalizing.
    pub(crate) fn apply(&self, base: WeightConfig) -> WeightConfig {
        if self.valuation.is_none() && self.quality.is_none() && self.timing.is_none() {
            return base;
        }
        WeightConfig::new(
            self.valuation.unwrap_or(base.valuation()),
            self.quality.unwrap_or(base.quality()),
            self.timing.unwrap_or(base.timing()),
        )
    }
}

/// Averages of the scored tickers that share a sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SectorSummary {
    pub(crate) sector: String,
    pub(crate) count: usize,
    pub(crate) mean_ivr: f64,
    pub(crate) mean_margin_of_safety: f64,
    /// Share of the sector passing the safety filter, in `[0, 1]`.
    pub(crate) passing_ratio: f64,
}

impl SectorSummary {
    /// Groups a run by sector, best mean IVR first.
    pub(crate) fn from_run(run: &ScreeningRun) -> Vec<Self> {
        let mut groups: BTreeMap<&str, Vec<_>> = BTreeMap::new();
        for entry in run.iter() {
            groups.entry(entry.sector.as_str()).or_default().push(entry);
        }

        let mut summaries: Vec<Self> = groups
            .into_iter()
            .map(|(sector, entries)| {
                let n = entries.len() as f64;
                Self {
                    sector: sector.to_string(),
                    count: entries.len(),
                    mean_ivr: entries.iter().map(|e| e.ivr).sum::<f64>() / n,
                    mean_margin_of_safety: entries.iter().map(|e| e.margin_of_safety).sum::<f64>()
                        / n,
                    passing_ratio: entries.iter().filter(|e| e.passes_filter).count() as f64 / n,
                }
            })
            .collect();
        summaries.sort_by(|a, b| b.mean_ivr.total_cmp(&a.mean_ivr));
        summaries
    }
}

fn print_sectors(sectors: &[SectorSummary]) {
    println!(
        "{:<28} {:>5} {:>9} {:>9} {:>9}",
        "Sector", "N", "Mean IVR", "Mean MoS", "Passing"
    );
    println!("{}", "─".repeat(64));
    for s in sectors {
        println!(
            "{:<28} {:>5} {:>8.2}% {:>8.2}% {:>8.0}%",
            truncate(&s.sector, 28),
            s.count,
            s.mean_ivr * 100.0,
            s.mean_margin_of_safety * 100.0,
            s.passing_ratio * 100.0
        );
    }
    println!();
}

/// Score, rank and print a set of tickers.
pub(crate) async fn run_scan(
    config: &AppConfig,
    input: Option<&str>,
    overrides: WeightOverrides,
    top: usize,
    format: OutputFormat,
    save: bool,
    by_sector: bool,
) -> Result<()> {
    let tickers = data::select_tickers(input, config)?;
    let model = ScoringModel::new(ModelConfig {
        weights: overrides.apply(config.weights),
        ..config.model_config()
    });
    let engine = data::build_engine(config, model)?;

    if format == OutputFormat::Text {
        banner("IVR Screener");
        let weights = engine.model().weights();
        println!(
            "Weights: valuation {:.0}% | quality {:.0}% | timing {:.0}%",
            weights.valuation() * 100.0,
            weights.quality() * 100.0,
            weights.timing() * 100.0
        );
        println!(
            "Screening {} ticker(s) via {}...\n",
            tickers.len(),
            engine.provider_name()
        );
    }

    let run = engine.score_many(tickers.as_slice()).await;

    match format {
        OutputFormat::Json if by_sector => {
            let output = json!({
                "ranking": run.top(top),
                "sectors": SectorSummary::from_run(&run),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(run.top(top))?);
        }
        OutputFormat::Text => {
            if run.is_empty() {
                println!("No ticker could be scored.\n");
            } else {
                print_ranking(run.top(top), &config.thresholds);
                let digest = AlertDigest::from_run(&run, &config.thresholds);
                println!(
                    "Scored {}/{} | passing filter: {} | buy signals: {} | sell signals: {}",
                    run.len(),
                    tickers.len(),
                    run.passing().count(),
                    digest.buys.len(),
                    digest.sells.len()
                );
                println!();
                if by_sector {
                    print_sectors(&SectorSummary::from_run(&run));
                }
            }
        }
    }

    if save && !run.is_empty() {
        let path = HistoryWriter::new(&config.history_dir).append(&run, Local::now().naive_local())?;
        if format == OutputFormat::Text {
            println!("Saved to {}\n", path.display());
        }
    }

    Ok(())
}
