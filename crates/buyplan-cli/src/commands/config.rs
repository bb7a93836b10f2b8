use std::path::Path;

use anyhow::{anyhow, Result};
use buyplan_cli::config::{default_config_path, save_config, BuyPlanConfig};
use tracing::info;

pub fn show(config: &BuyPlanConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn init(path: Option<&Path>, force: bool) -> Result<()> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if target.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            target.display()
        ));
    }
    save_config(&BuyPlanConfig::default(), &target)?;
    println!("Wrote config to {}", target.display());
    info!("buyplan config written to {}", target.display());
    Ok(())
}
