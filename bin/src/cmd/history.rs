//! History command implementation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ivr_report::{HistoryRecord, HistoryWriter};

use crate::cmd::{banner, truncate};
use crate::config::AppConfig;

/// Records of the most recent run in `records`, best IVR first.
pub(crate) fn latest_run(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let Some(latest) = records.iter().map(|r| r.timestamp.clone()).max() else {
        return Vec::new();
    };
    let mut run: Vec<HistoryRecord> = records
        .into_iter()
        .filter(|r| r.timestamp == latest)
        .collect();
    run.sort_by(|a, b| b.ivr.total_cmp(&a.ivr));
    run
}

fn resolve_file(writer: &HistoryWriter, name: &str) -> PathBuf {
    let direct = Path::new(name);
    if direct.exists() {
        direct.to_path_buf()
    } else {
        writer.dir().join(name)
    }
}

/// List history files, or print the latest run stored in one.
pub(crate) fn show_history(config: &AppConfig, show: Option<&str>, top: usize) -> Result<()> {
    let writer = HistoryWriter::new(&config.history_dir);

    let Some(name) = show else {
        banner("Screening History");
        let files = writer.list_files()?;
        if files.is_empty() {
            println!("No history in {}\n", writer.dir().display());
            return Ok(());
        }
        println!("{:<26} {:>6} {:>6}", "File", "Runs", "Rows");
        println!("{}", "─".repeat(40));
        for path in &files {
            let records = HistoryWriter::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let runs: BTreeSet<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("{:<26} {:>6} {:>6}", file_name, runs.len(), records.len());
        }
        println!("\nUse --show <file> to display the latest run of a day.\n");
        return Ok(());
    };

    let path = resolve_file(&writer, name);
    let records =
        HistoryWriter::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let run = latest_run(records);

    banner("Stored Run");
    if let Some(first) = run.first() {
        println!("{} ({} tickers)\n", first.timestamp, run.len());
    }
    println!(
        "{:>4} {:<7} {:<28} {:>6} {:>9} {:>7}  {}",
        "#", "Ticker", "Name", "IVR", "Price", "MoS", "Filter"
    );
    println!("{}", "─".repeat(90));
    for (rank, record) in run.iter().take(top).enumerate() {
        println!(
            "{:>4} {:<7} {:<28} {:>6.3} {:>9.2} {:>6.1}%  {}",
            rank + 1,
            record.ticker,
            truncate(&record.name, 28),
            record.ivr,
            record.price,
            record.margin_of_safety * 100.0,
            record.filter_reason
        );
    }
    println!();
    Ok(())
}
