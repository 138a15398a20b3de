//! Alert test command implementation.

use anyhow::{Context, Result, bail};
use ivr_report::AlertMailer;

use crate::config::{AppConfig, SMTP_PASSWORD_VAR};

/// Send a plain-text test e-mail with the configured SMTP settings.
pub(crate) async fn send_test_alert(config: &AppConfig) -> Result<()> {
    if !config.email.is_configured() {
        bail!("E-mail is not configured: set email.from_address and email.to_address");
    }
    if config.email.password.is_empty() {
        bail!("No SMTP password: set email.password or {SMTP_PASSWORD_VAR}");
    }

    let mailer = AlertMailer::new(config.email.clone(), config.thresholds);
    println!(
        "Sending test e-mail to {} via {}:{}...",
        config.email.to_address, config.email.smtp_host, config.email.smtp_port
    );
    tokio::task::spawn_blocking(move || mailer.send_test())
        .await
        .context("E-mail task failed")??;
    println!("Test e-mail sent.");
    Ok(())
}
