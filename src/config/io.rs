// src/config/io.rs
use super::types::{Config, DemandBoardToml};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "demandboard.toml";
pub const TOKEN_ENV: &str = "GH_TOKEN";

/// Reads `path` into `config`. A missing file leaves the defaults in place.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_toml_config(config: &mut Config, path: &Path) -> Result<()> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_toml(config, &content).with_context(|| format!("Invalid TOML in {}", path.display()))
}

/// Applies a TOML document to `config`.
///
/// # Errors
/// Returns error if the document does not match the config schema.
pub fn parse_toml(config: &mut Config, content: &str) -> Result<()> {
    let parsed: DemandBoardToml = toml::from_str(content)?;
    config.collector = parsed.collector;
    config.viewer = parsed.viewer;
    Ok(())
}

pub fn load_token_from_env(config: &mut Config) {
    if config.token.is_none() {
        config.token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
    }
}

