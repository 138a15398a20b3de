//! Append-only CSV history of screening runs.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use ivr_traits::{ScoreBreakdown, ScreeningRun};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One history row: a breakdown stamped with its run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Ticker symbol.
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// Sector.
    pub sector: String,
    /// Last close.
    pub price: f64,
    /// DCF intrinsic value per share.
    pub intrinsic_value: f64,
    /// Margin of safety.
    pub margin_of_safety: f64,
    /// Composite IVR.
    pub ivr: f64,
    /// Valuation sub-score.
    pub valuation_score: f64,
    /// Quality sub-score.
    pub quality_score: f64,
    /// Timing sub-score.
    pub timing_score: f64,
    /// RSI(14).
    pub rsi: f64,
    /// Safety filter outcome.
    pub passes_filter: bool,
    /// Filter verdict message.
    pub filter_reason: String,
    /// Run time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl HistoryRecord {
    /// Stamps a breakdown with `timestamp`.
    #[must_use]
    pub fn new(entry: &ScoreBreakdown, timestamp: NaiveDateTime) -> Self {
        Self {
            ticker: entry.ticker.clone(),
            name: entry.name.clone(),
            sector: entry.sector.clone(),
            price: entry.price,
            intrinsic_value: entry.intrinsic_value,
            margin_of_safety: entry.margin_of_safety,
            ivr: entry.ivr,
            valuation_score: entry.valuation_score,
            quality_score: entry.quality_score,
            timing_score: entry.timing_score,
            rsi: entry.rsi,
            passes_filter: entry.passes_filter,
            filter_reason: entry.filter_reason.clone(),
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Writes runs to `screener_YYYYMMDD.csv` files in one directory.
#[derive(Debug, Clone)]
pub struct HistoryWriter {
    dir: PathBuf,
}

impl HistoryWriter {
    /// Create a writer for `dir`. The directory is created on first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// History directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Daily file for the date of `timestamp`.
    pub fn file_for(&self, timestamp: NaiveDateTime) -> PathBuf {
        self.dir
            .join(format!("screener_{}.csv", timestamp.format("%Y%m%d")))
    }

    /// Appends every entry of `run` to the daily file.
    ///
    /// The header is written only when the file is created. Returns the
    /// path written to.
    pub fn append(&self, run: &ScreeningRun, timestamp: NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.file_for(timestamp);
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        for entry in run {
            writer.serialize(HistoryRecord::new(entry, timestamp))?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = run.len(), "History appended");
        Ok(path)
    }

    /// History files sorted by name, oldest day first.
    ///
    /// A missing directory yields an empty list.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("screener_") && n.ends_with(".csv"))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Reads every record of one history file.
    pub fn read(path: impl AsRef<Path>) -> Result<Vec<HistoryRecord>> {
        let mut reader = csv::Reader::from_path(path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<HistoryRecord>, _>>()?;
        Ok(records)
    }
}
