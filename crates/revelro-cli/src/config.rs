//! Configuration file handling for revelro-cli
//!
//! The file lives at `<config dir>/revelro-cli/config.toml` unless `--config`
//! names another one. Values are checked when the file is read, so a typo in
//! `output` fails up front instead of quietly falling back to a table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::output::OutputFormat;

/// Gateway address used when neither flag nor config names one
pub const DEFAULT_SERVER: &str = "http://localhost:3001";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Gateway URL
    pub server: Option<String>,
    /// Output format (`table` or `json`)
    pub output: Option<OutputFormat>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Whole-request timeout for gateway calls
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load the file named by `--config`, or the default file if it exists
    ///
    /// An explicit path must exist. A missing default file yields an empty
    /// config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::read(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(server) = &self.server {
            if !server.starts_with("http://") && !server.starts_with("https://") {
                bail!("server must be an http:// or https:// URL, got {server:?}");
            }
        }
        if self.timeout_secs == Some(0) {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("revelro-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Apply command-line flags over file values
    pub fn resolve(
        &self,
        server: Option<&str>,
        output: Option<OutputFormat>,
        no_color: bool,
    ) -> Settings {
        Settings {
            server: server
                .map(String::from)
                .or_else(|| self.server.clone())
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            output: output.or(self.output).unwrap_or_default(),
            no_color: no_color || self.no_color.unwrap_or(false),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Settings the commands run with
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: String,
    pub output: OutputFormat,
    pub no_color: bool,
    /// `None` keeps the client's default
    pub timeout: Option<Duration>,
}
