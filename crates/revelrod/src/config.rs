//! Daemon configuration
//!
//! Sources, lowest precedence first: built-in defaults, the optional TOML
//! file given on the command line, then the process environment.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::Context;
use revelro_soap::RegCheckConfig;
use serde::Deserialize;

/// Full daemon configuration (one TOML file)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub regcheck: RegCheckConfig,
}

/// `[server]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl DaemonConfig {
    /// Load, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override from `REVELRO_*` and `REGCHECK_*` variables
    pub fn apply_env<F>(&mut self, var: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = get("REVELRO_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = get("REVELRO_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("REVELRO_PORT '{}' is not a valid port", port))?;
        }

        self.regcheck.apply_env(&var)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.socket_addr()?;
        self.regcheck
            .validate()
            .context("Invalid RegCheck configuration (set REGCHECK_USERNAME or [regcheck] username)")
    }

    /// Address the listener binds to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.server.bind))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    use revelro_soap::config::TransportConfig;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(
            config.socket_addr().unwrap(),
            "0.0.0.0:3001".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_missing_username_fails_validation() {
        let err = DaemonConfig::default().validate().unwrap_err();
        assert!(format!("{:#}", err).contains("REGCHECK_USERNAME"));
    }

    #[test]
    fn test_from_toml() {
        let config = DaemonConfig::from_toml(
            r#"
            [server]
            port = 8080

            [regcheck]
            username = "acct"
            operation = "CheckIndia"

            [regcheck.transport]
            type = "mock"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.regcheck.username, "acct");
        assert!(matches!(config.regcheck.transport, TransportConfig::Mock(_)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[regcheck]\nusername = \"from-file\"").unwrap();

        let config = DaemonConfig::from_file(file.path()).unwrap();
        assert_eq!(config.regcheck.username, "from-file");
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = DaemonConfig::from_file(Path::new("/nonexistent/revelrod.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/revelrod.toml"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config =
            DaemonConfig::from_toml("[server]\nport = 8080\n[regcheck]\nusername = \"file\"")
                .unwrap();
        config
            .apply_env(env(&[
                ("REVELRO_PORT", "9090"),
                ("REVELRO_BIND", "127.0.0.1"),
                ("REGCHECK_USERNAME", "env-account"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.regcheck.username, "env-account");
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:9090".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = DaemonConfig::default();
        assert!(config.apply_env(env(&[("REVELRO_PORT", "http")])).is_err());

        let mut config = DaemonConfig::default();
        config.server.bind = "localhost:3001".to_string();
        assert!(config.socket_addr().is_err());
    }
}
