//! Universe listing command implementation.

use anyhow::{Result, bail};
use ivr_screen::universe::{UNIVERSES, universe, universe_names};

use crate::cmd::banner;

/// List every universe, or the members of one.
pub(crate) fn list_universes(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        banner("Universes");
        println!("{:<22} {:>7}  Description", "Name", "Tickers");
        println!("{}", "─".repeat(70));
        for u in UNIVERSES {
            println!("{:<22} {:>7}  {}", u.name, u.tickers.len(), u.description);
        }
        println!("\nUse `ivr scan <name>` to screen a universe.\n");
        return Ok(());
    };

    let Some(u) = universe(name) else {
        bail!(
            "Unknown universe '{name}'. Available: {}",
            universe_names().join(", ")
        );
    };

    banner(u.name);
    println!("{}\n", u.description);
    for row in u.tickers.chunks(8) {
        println!("  {}", row.join("  "));
    }
    println!();
    Ok(())
}
