//! Init command implementation.

use std::path::Path;

use anyhow::{Result, bail};

use crate::config::AppConfig;

/// Write a configuration file holding every default.
pub(crate) fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    AppConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ivr.json");

        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.interval_minutes, 30);
    }
}
