//! Config command handlers.

use advise_core::config::{self, Config};
use anyhow::{Context, Result};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn show() -> Result<()> {
    let config = Config::load()?;
    let rendered = toml::to_string(&config).context("serialize config")?;
    print!("{rendered}");
    Ok(())
}
