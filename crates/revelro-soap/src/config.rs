//! RegCheck provider configuration
//!
//! Loaded from the `[regcheck]` table of the daemon config file and then
//! overridden by `REGCHECK_*` environment variables.

use std::fmt;
use std::time::Duration;

use revelro_core::redact::mask_identifier;
use serde::{Deserialize, Serialize};

use crate::envelope::{is_valid_element_name, soap_action};
use crate::error::ConfigError;

/// Configuration for the RegCheck SOAP backend
#[derive(Clone, Serialize, Deserialize)]
pub struct RegCheckConfig {
    /// SOAP endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Account identifier sent inside every envelope
    #[serde(default)]
    pub username: String,
    /// SOAP operation name (e.g., "CheckIndia")
    #[serde(default = "default_operation")]
    pub operation: String,
    /// Namespace of the operation element in SOAP 1.2 requests
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Namespace of the operation element and `SOAPAction` prefix in SOAP 1.1 requests
    #[serde(default = "default_soap11_namespace")]
    pub soap11_namespace: String,
    /// Overall request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Transport selection
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_endpoint() -> String {
    "https://www.regcheck.org.uk/api/reg.asmx".to_string()
}

fn default_operation() -> String {
    "CheckIndia".to_string()
}

fn default_namespace() -> String {
    "http://regcheck.org.uk".to_string()
}

fn default_soap11_namespace() -> String {
    "http://regcheck.org.uk/".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for RegCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            username: String::new(),
            operation: default_operation(),
            namespace: default_namespace(),
            soap11_namespace: default_soap11_namespace(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            transport: TransportConfig::default(),
        }
    }
}

// The username never appears in full in Debug output
impl fmt::Debug for RegCheckConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegCheckConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.masked_username())
            .field("operation", &self.operation)
            .field("namespace", &self.namespace)
            .field("soap11_namespace", &self.soap11_namespace)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("transport", &self.transport)
            .finish()
    }
}

impl RegCheckConfig {
    /// Defaults with the given account identifier
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Point the backend at another endpoint (mock upstreams, staging)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Load from the process environment and validate
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `REGCHECK_*` variables.
    ///
    /// `var` resolves a variable name to its value; empty values are ignored.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("REGCHECK_API_URL") {
            self.endpoint = v;
        }
        if let Some(v) = get("REGCHECK_USERNAME") {
            self.username = v;
        }
        if let Some(v) = get("REGCHECK_OPERATION") {
            self.operation = v;
        }
        if let Some(v) = get("REGCHECK_NAMESPACE") {
            self.namespace = v;
        }
        if let Some(v) = get("REGCHECK_SOAP11_NAMESPACE") {
            self.soap11_namespace = v;
        }
        if let Some(v) = get("REGCHECK_TIMEOUT_SECS") {
            self.timeout_secs = parse_secs("REGCHECK_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("REGCHECK_CONNECT_TIMEOUT_SECS") {
            self.connect_timeout_secs = parse_secs("REGCHECK_CONNECT_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("REGCHECK_TRANSPORT") {
            self.transport = match v.trim().to_lowercase().as_str() {
                "http" => TransportConfig::Http,
                "mock" => TransportConfig::Mock(MockConfig::default()),
                other => {
                    return Err(ConfigError::Invalid {
                        key: "REGCHECK_TRANSPORT",
                        message: format!("unknown transport '{}', expected 'http' or 'mock'", other),
                    })
                }
            };
        }
        Ok(())
    }

    /// Check that the configuration can produce valid requests
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Missing("REGCHECK_USERNAME"));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "REGCHECK_API_URL",
                message: format!("'{}' is not an http(s) URL", self.endpoint),
            });
        }
        if !is_valid_element_name(&self.operation) {
            return Err(ConfigError::Invalid {
                key: "REGCHECK_OPERATION",
                message: format!("'{}' is not a valid XML element name", self.operation),
            });
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REGCHECK_TIMEOUT_SECS",
                message: "timeouts must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    /// Username safe for logs and diagnostic responses
    pub fn masked_username(&self) -> String {
        mask_identifier(&self.username)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// `SOAPAction` header for SOAP 1.1 requests
    pub fn soap_action(&self) -> String {
        soap_action(&self.soap11_namespace, &self.operation)
    }

    /// Element names leading from the envelope root to the result payload
    pub fn result_path(&self) -> [String; 4] {
        [
            "Envelope".to_string(),
            "Body".to_string(),
            format!("{}Response", self.operation),
            format!("{}Result", self.operation),
        ]
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        message: format!("'{}' is not a whole number of seconds", value),
    })
}

// =============================================================================
// Transport Configuration
// =============================================================================

/// Transport configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// HTTPS POST to the configured endpoint
    #[default]
    Http,
    /// Canned responses, no network (demos and tests)
    Mock(MockConfig),
}

/// Mock transport configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Simulated round-trip latency
    #[serde(default)]
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RegCheckConfig::new("acct");
        assert_eq!(config.endpoint, "https://www.regcheck.org.uk/api/reg.asmx");
        assert_eq!(config.operation, "CheckIndia");
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.soap_action(), "http://regcheck.org.uk/CheckIndia");
        assert_eq!(
            config.result_path(),
            [
                "Envelope".to_string(),
                "Body".to_string(),
                "CheckIndiaResponse".to_string(),
                "CheckIndiaResult".to_string()
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_username_rejected() {
        let config = RegCheckConfig::default();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing("REGCHECK_USERNAME"))
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RegCheckConfig::default();
        config
            .apply_env(env(&[
                ("REGCHECK_USERNAME", "secret-account"),
                ("REGCHECK_API_URL", "http://127.0.0.1:9999/reg.asmx"),
                ("REGCHECK_OPERATION", "CheckUK"),
                ("REGCHECK_TIMEOUT_SECS", "5"),
                ("REGCHECK_TRANSPORT", "mock"),
                ("REGCHECK_NAMESPACE", ""),
            ]))
            .unwrap();

        assert_eq!(config.username, "secret-account");
        assert_eq!(config.endpoint, "http://127.0.0.1:9999/reg.asmx");
        assert_eq!(config.operation, "CheckUK");
        assert_eq!(config.timeout_secs, 5);
        // Empty values leave defaults alone
        assert_eq!(config.namespace, "http://regcheck.org.uk");
        assert!(matches!(config.transport, TransportConfig::Mock(_)));
    }

    #[test]
    fn test_bad_env_values() {
        let mut config = RegCheckConfig::default();
        assert!(config
            .apply_env(env(&[("REGCHECK_TIMEOUT_SECS", "soon")]))
            .is_err());
        assert!(config
            .apply_env(env(&[("REGCHECK_TRANSPORT", "carrier-pigeon")]))
            .is_err());
    }

    #[test]
    fn test_invalid_operation_rejected() {
        let mut config = RegCheckConfig::new("acct");
        config.operation = "Check><Evil".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                key: "REGCHECK_OPERATION",
                ..
            })
        ));
    }

    #[test]
    fn test_debug_masks_username() {
        let config = RegCheckConfig::new("secret-account");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-account"));
        assert!(debug.contains("se***"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: RegCheckConfig = toml::from_str(
            r#"
            username = "acct"
            timeout_secs = 15

            [transport]
            type = "mock"
            latency_ms = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.username, "acct");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.connect_timeout_secs, 10);
        match config.transport {
            TransportConfig::Mock(mock) => assert_eq!(mock.latency_ms, 25),
            other => panic!("Expected mock transport, got {:?}", other),
        }
    }
}
