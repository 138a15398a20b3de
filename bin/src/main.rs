//! IVR screener CLI binary.
//!
//! Screens equities by Relative Valuation Index, runs the screener on a
//! schedule, keeps a CSV history and sends e-mail alerts.

mod cmd;
mod config;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "ivr")]
#[command(about = "Relative Valuation Index equity screener", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true, default_value = "ivr.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank a universe or a list of tickers
    Scan {
        /// Universe name or comma-separated tickers (defaults to the configured watchlist)
        tickers: Option<String>,

        /// Valuation weight override
        #[arg(long)]
        valuation: Option<f64>,

        /// Quality weight override
        #[arg(long)]
        quality: Option<f64>,

        /// Timing weight override
        #[arg(long)]
        timing: Option<f64>,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        top: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Append the run to the history directory
        #[arg(long)]
        save: bool,

        /// Also summarize the run per sector
        #[arg(long)]
        by_sector: bool,
    },

    /// Show the detailed breakdown for one ticker
    Score {
        /// Ticker symbol
        ticker: String,
    },

    /// List the signals behind each sub-score
    Signals {
        /// Filter by category (value, quality, momentum)
        #[arg(long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// List predefined universes, or the tickers of one
    Universes {
        /// Universe name
        name: Option<String>,
    },

    /// Run the screener periodically until interrupted
    Schedule {
        /// Minutes between runs (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Run once and exit
        #[arg(long)]
        once: bool,
    },

    /// List history files, or show the latest run stored in one
    History {
        /// History file name or path
        #[arg(short, long)]
        show: Option<String>,

        /// Number of rows to show
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Send a test e-mail with the configured SMTP settings
    AlertTest,

    /// Write a configuration file with every default filled in
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for tabular commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable table
    Text,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Scan {
            tickers,
            valuation,
            quality,
            timing,
            top,
            format,
            save,
            by_sector,
        } => {
            let config = AppConfig::load(&cli.config)?;
            let overrides = cmd::scan::WeightOverrides {
                valuation,
                quality,
                timing,
            };
            cmd::scan::run_scan(
                &config,
                tickers.as_deref(),
                overrides,
                top,
                format,
                save,
                by_sector,
            )
            .await?;
        }
        Commands::Score { ticker } => {
            let config = AppConfig::load(&cli.config)?;
            cmd::score::show_score(&config, &ticker).await?;
        }
        Commands::Signals { category, verbose } => {
            cmd::signals::list_signals(category.as_deref(), verbose);
        }
        Commands::Universes { name } => {
            cmd::universes::list_universes(name.as_deref())?;
        }
        Commands::Schedule { interval, once } => {
            let config = AppConfig::load(&cli.config)?;
            cmd::schedule::run_schedule(&config, interval, once).await?;
        }
        Commands::History { show, top } => {
            let config = AppConfig::load(&cli.config)?;
            cmd::history::show_history(&config, show.as_deref(), top)?;
        }
        Commands::AlertTest => {
            let config = AppConfig::load(&cli.config)?;
            cmd::alert::send_test_alert(&config).await?;
        }
        Commands::Init { force } => {
            cmd::init::write_default_config(&cli.config, force)?;
        }
    }

    Ok(())
}
