// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::{CONFIG_FILE, TOKEN_ENV};
pub use self::types::{CollectorConfig, Config, DemandBoardToml, ViewerConfig};
use anyhow::{bail, Result};
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `demandboard.toml` (or `path`) and the token from the environment.
    ///
    /// # Errors
    /// Returns error if the config file exists but is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::new();
        config.load_local_config(path.unwrap_or(Path::new(CONFIG_FILE)))?;
        Ok(config)
    }

    /// # Errors
    /// Returns error if the config file exists but is invalid.
    pub fn load_local_config(&mut self, path: &Path) -> Result<()> {
        io::load_toml_config(self, path)?;
        io::load_token_from_env(self);
        Ok(())
    }

    /// # Errors
    /// Returns error if the document does not match the config schema.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        io::parse_toml(self, content)
    }

    /// Rejects settings the collector cannot run with.
    ///
    /// # Errors
    /// Returns error naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let c = &self.collector;
        if c.per_page == 0 || c.per_page > 100 {
            bail!("collector.per_page must be between 1 and 100 (got {})", c.per_page);
        }
        if c.max_pages == 0 {
            bail!("collector.max_pages must be at least 1");
        }
        if c.window_days == 0 {
            bail!("collector.window_days must be at least 1");
        }
        if c.output.trim().is_empty() {
            bail!("collector.output must not be empty");
        }
        if self.viewer.source.trim().is_empty() {
            bail!("viewer.source must not be empty");
        }
        Ok(())
    }
}
