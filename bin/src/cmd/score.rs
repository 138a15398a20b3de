//! Score command implementation.

use anyhow::{Context, Result};
use ivr_screen::ScoringModel;
use ivr_traits::RawFinancials;

use crate::cmd::banner;
use crate::config::AppConfig;
use crate::data;

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.decimals$}"))
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn print_inputs(data: &RawFinancials) {
    println!("INPUTS");
    println!("{}", "─".repeat(40));
    println!("  P/E (trailing)        {:>12}", fmt_opt(data.trailing_pe, 2));
    println!("  P/E (industry)        {:>12}", fmt_opt(data.industry_pe, 2));
    println!("  P/B                   {:>12}", fmt_opt(data.price_to_book, 2));
    println!("  P/S                   {:>12}", fmt_opt(data.price_to_sales, 2));
    println!("  EV/EBITDA             {:>12}", fmt_opt(data.ev_to_ebitda, 2));
    println!("  Debt/Equity           {:>12}", fmt_opt(data.debt_to_equity, 2));
    println!("  Current ratio         {:>12}", fmt_opt(data.current_ratio, 2));
    println!("  Revenue growth        {:>12}", fmt_pct(data.revenue_growth));
    println!("  Earnings growth       {:>12}", fmt_pct(data.earnings_growth));
    println!("  EPS (TTM)             {:>12}", fmt_opt(data.trailing_eps, 2));
    println!(
        "  Free cash flow ($M)   {:>12}",
        fmt_opt(data.free_cash_flow.map(|v| v / 1e6), 0)
    );
    println!("  Price history (days)  {:>12}", data.prices.len());
    println!();
}

/// Show the full breakdown for one ticker.
pub(crate) async fn show_score(config: &AppConfig, ticker: &str) -> Result<()> {
    let symbol = ticker.trim().to_ascii_uppercase();
    let engine = data::build_engine(config, ScoringModel::new(config.model_config()))?;

    banner("IVR Breakdown");
    println!("Fetching {symbol} from {}...\n", engine.provider_name());

    let snapshot = engine
        .fetch(&symbol)
        .await
        .with_context(|| format!("Could not fetch data for {symbol}"))?;
    let entry = engine.score_snapshot(&snapshot);

    println!("{} - {}", entry.ticker, entry.name);
    println!("Sector: {}\n", entry.sector);

    print_inputs(&snapshot);

    println!("VALUATION");
    println!("{}", "─".repeat(40));
    println!("  Price                 {:>12.2}", entry.price);
    println!("  Intrinsic value       {:>12.2}", entry.intrinsic_value);
    println!(
        "  Margin of safety      {:>11.1}%",
        entry.margin_of_safety * 100.0
    );
    println!("  RSI(14)               {:>12.1}", entry.rsi);
    println!();

    let weights = engine.model().weights();
    println!("SCORES");
    println!("{}", "─".repeat(40));
    println!(
        "  Valuation ({:>3.0}%)      {:>12.3}",
        weights.valuation() * 100.0,
        entry.valuation_score
    );
    println!(
        "  Quality   ({:>3.0}%)      {:>12.3}",
        weights.quality() * 100.0,
        entry.quality_score
    );
    println!(
        "  Timing    ({:>3.0}%)      {:>12.3}",
        weights.timing() * 100.0,
        entry.timing_score
    );
    println!();

    let mark = if entry.passes_filter { "✓" } else { "✗" };
    println!("Safety filter: {mark} {}", entry.filter_reason);
    println!(
        "IVR: {:.3}  →  {}",
        entry.ivr,
        config.thresholds.classify(entry.ivr)
    );
    println!();

    Ok(())
}
