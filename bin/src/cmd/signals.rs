//! Signal listing command implementation.

use ivr_signals::SignalCategory;
use ivr_signals::registry::{available_categories, signals_by_category};

use crate::cmd::banner;

fn category_name(category: SignalCategory) -> &'static str {
    match category {
        SignalCategory::Value => "Value",
        SignalCategory::Quality => "Quality",
        SignalCategory::Momentum => "Momentum",
    }
}

/// List available signals, optionally filtered by category.
pub(crate) fn list_signals(category: Option<&str>, verbose: bool) {
    banner("Available Signals");

    for cat in available_categories() {
        let cat_name = category_name(cat);
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        println!(
            "{} → {} sub-score: {}",
            cat_name,
            cat.sub_score(),
            cat.description()
        );
        println!("{}", "-".repeat(60));

        for info in signals_by_category(&cat) {
            if verbose {
                println!(
                    "  {:22} - {} (weight {:.2}, lookback: {} days{})",
                    info.name,
                    info.description,
                    info.weight_in_sub_score,
                    info.typical_lookback,
                    if info.requires_fundamentals {
                        ", fundamentals"
                    } else {
                        ""
                    }
                );
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed signal descriptions.\n");
    }
}
