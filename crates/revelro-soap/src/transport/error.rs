//! Transport layer errors

use revelro_core::LookupError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Classify a reqwest failure.
///
/// The messages are fixed per kind. reqwest's own text names the endpoint URL
/// and is only fit for server logs.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout("no response from provider in time".to_string())
        } else if err.is_connect() {
            TransportError::ConnectionFailed("provider unreachable".to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::ReceiveFailed("provider response could not be read".to_string())
        } else {
            TransportError::RequestFailed("request to provider could not be sent".to_string())
        }
    }
}

/// Every transport failure is a network-layer upstream error with no status
impl From<TransportError> for LookupError {
    fn from(err: TransportError) -> Self {
        LookupError::Transport(err.to_string())
    }
}
