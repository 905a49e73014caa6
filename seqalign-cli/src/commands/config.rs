//! Config command implementation - print or write seqalign.toml

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

pub fn execute(config: &Config, example: bool, write: Option<&Path>) -> Result<()> {
    match write {
        Some(path) => {
            let chosen = if example { Config::default() } else { config.clone() };
            chosen.save_to_file(path)?;
            log::info!("Wrote configuration to {}", path.display());
        }
        None if example => print!("{}", Config::example_toml()?),
        None => print!("{}", toml::to_string_pretty(config).context("Failed to serialize configuration")?),
    }

    Ok(())
}
