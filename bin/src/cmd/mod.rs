//! CLI subcommand modules.
//!
//! This module contains the implementations for all ivr CLI subcommands,
//! plus the table helpers they share.

pub(crate) mod alert;
pub(crate) mod history;
pub(crate) mod init;
pub(crate) mod scan;
pub(crate) mod schedule;
pub(crate) mod score;
pub(crate) mod signals;
pub(crate) mod universes;

use ivr_report::SignalThresholds;
use ivr_traits::ScoreBreakdown;

/// Prints a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Shortens `text` to at most `width` characters.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Prints ranked breakdowns as a table.
pub(crate) fn print_ranking(entries: &[ScoreBreakdown], thresholds: &SignalThresholds) {
    println!(
        "{:>4} {:<7} {:<24} {:>6} {:>6} {:>6} {:>6} {:>9} {:>9} {:>7} {:>5}  {:<12}",
        "#", "Ticker", "Name", "IVR", "Val", "Qual", "Time", "Price", "Intrinsic", "MoS", "RSI", "Signal"
    );
    println!("{}", "─".repeat(112));

    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>4} {:<7} {:<24} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>9.2} {:>9.2} {:>6.1}% {:>5.1}  {:<12}",
            rank + 1,
            entry.ticker,
            truncate(&entry.name, 24),
            entry.ivr,
            entry.valuation_score,
            entry.quality_score,
            entry.timing_score,
            entry.price,
            entry.intrinsic_value,
            entry.margin_of_safety * 100.0,
            entry.rsi,
            thresholds.classify(entry.ivr),
        );
        if !entry.passes_filter {
            println!("{:>12} {}", "↳", entry.filter_reason);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Apple Inc.", 24), "Apple Inc.");
        assert_eq!(truncate("International Business Machines", 10), "Internati…");
        assert_eq!(truncate("Ünïcödé", 4), "Ünï…");
    }
}
