use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use scrollkit_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, init: bool, force: bool) -> Result<()> {
    if !init {
        let source = if path.exists() { "loaded from" } else { "defaults, no file at" };
        println!("# {} {}", source, path.display());
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if path.exists() && !force {
        bail!(
            "Config already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save_to(path)?;
    info!(path = %path.display(), "Default config written");
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
