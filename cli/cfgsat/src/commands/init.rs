//! `cfgsat init`: write a default `cfgsat.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::{CfgsatConfig, CONFIG_FILE};

/// Write a default configuration into `dir`.
pub fn run(dir: &Path) -> Result<()> {
    let path = create_config(dir)?;
    println!("Created {}", path.display());
    Ok(())
}

pub(crate) fn create_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    fs::write(&path, CfgsatConfig::template())
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "configuration written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_config(dir.path()).unwrap();

        assert!(path.is_file());
        let config = CfgsatConfig::load(&path).unwrap();
        assert_eq!(config, CfgsatConfig::default());
    }

    #[test]
    fn init_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        create_config(dir.path()).unwrap();
        assert!(create_config(dir.path()).is_err());
    }
}
