//! Error types for gateway client operations

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, RevelroClientError>;

/// Errors that can occur during client operations
#[derive(Error, Debug)]
pub enum RevelroClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Gateway returned an error response
    #[error("Server error {status}: {error}")]
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl RevelroClientError {
    /// Create an API error from status code and message
    pub fn api(status: u16, error: impl Into<String>, details: Option<String>) -> Self {
        Self::Api {
            status,
            error: error.into(),
            details,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the gateway had no record for the registration
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
