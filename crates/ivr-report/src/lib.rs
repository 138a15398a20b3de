//! Reporting for the IVR screener.
//!
//! - [`SignalThresholds`] turns IVR scores into buy/sell classes and builds
//!   the [`AlertDigest`] of a run.
//! - [`AlertMailer`] renders the digest as HTML and sends it over STARTTLS
//!   SMTP.
//! - [`HistoryWriter`] appends every run to a daily CSV file.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Local;
//! use ivr_report::{AlertMailer, EmailConfig, HistoryWriter, SignalThresholds};
//!
//! let now = Local::now().naive_local();
//! HistoryWriter::new("history").append(&run, now)?;
//!
//! let mailer = AlertMailer::new(EmailConfig::default(), SignalThresholds::default());
//! if mailer.send_digest(&run, now)? {
//!     println!("alert sent");
//! }
//! ```

mod classify;
mod email;
mod error;
mod history;
mod html;

pub use classify::{AlertDigest, SignalClass, SignalThresholds};
pub use email::{AlertMailer, EmailConfig};
pub use error::ReportError;
pub use history::{HistoryRecord, HistoryWriter};
pub use html::render_digest;

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
