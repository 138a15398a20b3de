//! SMTP delivery of alert digests.

use chrono::NaiveDateTime;
use ivr_traits::ScreeningRun;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{AlertDigest, Result, SignalThresholds, render_digest};

/// Outbound e-mail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Whether alerts are sent at all (default: true)
    pub enabled: bool,

    /// SMTP relay host (default: smtp.gmail.com)
    pub smtp_host: String,

    /// SMTP submission port, upgraded with STARTTLS (default: 587)
    pub smtp_port: u16,

    /// Sender address.
    pub from_address: String,

    /// Recipient address.
    pub to_address: String,

    /// SMTP login, the sender address when unset.
    pub username: Option<String>,

    /// SMTP password or app password.
    #[serde(skip_serializing)]
    pub password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            from_address: String::new(),
            to_address: String::new(),
            username: None,
            password: String::new(),
        }
    }
}

impl EmailConfig {
    /// Whether both sender and recipient are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.from_address.trim().is_empty() && !self.to_address.trim().is_empty()
    }

    fn credentials(&self) -> Credentials {
        let username = self
            .username
            .clone()
            .unwrap_or_else(|| self.from_address.clone());
        Credentials::new(username, self.password.clone())
    }
}

/// Sends alert digests and test messages.
#[derive(Debug, Clone)]
pub struct AlertMailer {
    config: EmailConfig,
    thresholds: SignalThresholds,
}

impl AlertMailer {
    /// Create a mailer.
    #[must_use]
    pub const fn new(config: EmailConfig, thresholds: SignalThresholds) -> Self {
        Self { config, thresholds }
    }

    /// Get the e-mail configuration.
    #[must_use]
    pub const fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Get the signal thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Assembles the HTML alert message for `digest`.
    pub fn build_digest_message(
        &self,
        digest: &AlertDigest<'_>,
        generated_at: NaiveDateTime,
    ) -> Result<Message> {
        let html = render_digest(digest, generated_at)?;
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.to_address.parse()?)
            .subject(digest.subject())
            .header(ContentType::TEXT_HTML)
            .body(html)?;
        Ok(message)
    }

    /// Sends the buy/sell digest of `run`.
    ///
    /// Returns `Ok(false)` without contacting the server when alerts are
    /// disabled, the addresses are not configured, or the run has no
    /// signals.
    pub fn send_digest(&self, run: &ScreeningRun, generated_at: NaiveDateTime) -> Result<bool> {
        if !self.config.enabled {
            debug!("Alerts disabled");
            return Ok(false);
        }
        if !self.config.is_configured() {
            warn!("Alert e-mail not configured, skipping");
            return Ok(false);
        }

        let digest = AlertDigest::from_run(run, &self.thresholds);
        if digest.is_empty() {
            info!("No buy or sell signals to report");
            return Ok(false);
        }

        let message = self.build_digest_message(&digest, generated_at)?;
        self.transport()?.send(&message)?;
        info!(
            to = %self.config.to_address,
            buys = digest.buys.len(),
            sells = digest.sells.len(),
            "Alert sent"
        );
        Ok(true)
    }

    /// Assembles the plain-text test message.
    pub fn build_test_message(&self) -> Result<Message> {
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.to_address.parse()?)
            .subject("Test - IVR Screener")
            .header(ContentType::TEXT_PLAIN)
            .body("This is a test e-mail from the IVR screener.".to_string())?;
        Ok(message)
    }

    /// Sends a plain-text test message, regardless of `enabled`.
    pub fn send_test(&self) -> Result<()> {
        let message = self.build_test_message()?;
        self.transport()?.send(&message)?;
        info!(to = %self.config.to_address, "Test e-mail sent");
        Ok(())
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let transport = SmtpTransport::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(self.config.credentials())
            .build();
        Ok(transport)
    }
}
