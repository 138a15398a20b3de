//! Error types for reporting.

use thiserror::Error;

/// Errors raised while writing history or sending alerts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTML template rendering failure.
    #[error("Failed to render alert: {0}")]
    Render(#[from] askama::Error),

    /// Invalid sender or recipient address.
    #[error("Invalid e-mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("Failed to build e-mail: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP connection or delivery failure.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
