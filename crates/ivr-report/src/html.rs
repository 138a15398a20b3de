//! HTML rendering of alert digests.

use askama::Template;
use chrono::NaiveDateTime;
use ivr_traits::ScoreBreakdown;

use crate::{AlertDigest, Result};

/// Display-ready fields of one digest entry.
struct DigestRow<'a> {
    ticker: &'a str,
    name: &'a str,
    sector: &'a str,
    ivr: String,
    price: String,
    intrinsic_value: String,
    margin_of_safety: String,
}

impl<'a> From<&'a ScoreBreakdown> for DigestRow<'a> {
    fn from(entry: &'a ScoreBreakdown) -> Self {
        Self {
            ticker: &entry.ticker,
            name: &entry.name,
            sector: &entry.sector,
            ivr: format!("{:.2}%", entry.ivr * 100.0),
            price: format!("${:.2}", entry.price),
            intrinsic_value: format!("${:.2}", entry.intrinsic_value),
            margin_of_safety: format!("{:.2}%", entry.margin_of_safety * 100.0),
        }
    }
}

#[derive(Template)]
#[template(path = "alert.html")]
struct AlertTemplate<'a> {
    generated_at: String,
    buys: Vec<DigestRow<'a>>,
    sells: Vec<DigestRow<'a>>,
}

/// Renders the HTML body of an alert e-mail.
///
/// Text fields are HTML-escaped.
pub fn render_digest(digest: &AlertDigest<'_>, generated_at: NaiveDateTime) -> Result<String> {
    let template = AlertTemplate {
        generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        buys: digest.buys.iter().map(|e| DigestRow::from(*e)).collect(),
        sells: digest.sells.iter().map(|e| DigestRow::from(*e)).collect(),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(ticker: &str, name: &str, ivr: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sector: "Communication Services".to_string(),
            price: 21.5,
            intrinsic_value: 30.0,
            margin_of_safety: 0.3953,
            ivr,
            valuation_score: 0.0,
            quality_score: 0.0,
            timing_score: 0.0,
            rsi: 50.0,
            passes_filter: true,
            filter_reason: String::new(),
        }
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    #[test]
    fn test_render_buy_section() {
        let buy = entry("T", "AT&T <Inc>", 0.7235);
        let digest = AlertDigest {
            buys: vec![&buy],
            sells: Vec::new(),
        };
        let html = render_digest(&digest, timestamp()).unwrap();

        assert!(html.contains("Updated: 2026-03-14 09:30:00"));
        assert!(html.contains("BUY SIGNALS (1)"));
        assert!(html.contains("AT&amp;T &lt;Inc&gt;"));
        assert!(html.contains("72.35%"));
        assert!(html.contains("$21.50"));
        assert!(html.contains("$30.00"));
        assert!(html.contains("39.53%"));
        assert!(html.contains("Communication Services"));
        assert!(!html.contains("SELL SIGNALS"));
    }

    #[test]
    fn test_render_sell_section_omits_valuation() {
        let sell = entry("F", "Ford Motor", 0.0);
        let digest = AlertDigest {
            buys: Vec::new(),
            sells: vec![&sell],
        };
        let html = render_digest(&digest, timestamp()).unwrap();

        assert!(html.contains("SELL SIGNALS (1)"));
        assert!(html.contains("F - Ford Motor"));
        assert!(html.contains("0.00%"));
        assert!(!html.contains("Intrinsic value"));
        assert!(!html.contains("BUY SIGNALS"));
    }
}
