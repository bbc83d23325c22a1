//! Config command implementations

use std::path::Path;

use anyhow::{Context, Result};
use spendcast_core::config::default_config_path;

use super::load_config;

pub fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let rendered = config
        .to_toml_string()
        .context("Failed to render engine config")?;
    println!("{}", rendered);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            let state = if path.exists() { "present" } else { "not present" };
            println!("{} ({})", path.display(), state);
        }
        None => println!("No data directory available on this platform"),
    }
    Ok(())
}
