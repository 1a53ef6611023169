//! Error taxonomy for registration lookups

use thiserror::Error;

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur while looking up a vehicle registration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Caller supplied an empty or missing registration number
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream answered successfully but held no vehicle record
    #[error("No vehicle data found for registration number {vehicle_number}")]
    NotFound { vehicle_number: String },

    /// Upstream answered with a non-success HTTP status
    #[error(
        "RegCheck API returned status: {status}. Check if username is valid or if the vehicle number format is correct."
    )]
    UpstreamStatus {
        /// HTTP status returned by the provider
        status: u16,
        /// Bounded excerpt of the response body (server-side logging only)
        body_excerpt: String,
    },

    /// Upstream answered 2xx but the payload could not be interpreted
    #[error("Malformed provider response (status {status}): {reason}")]
    MalformedResponse {
        status: u16,
        reason: String,
        body_excerpt: String,
    },

    /// Network-layer failure; no HTTP status was received
    #[error("Transport error: {0}")]
    Transport(String),
}

impl LookupError {
    /// Returns the HTTP status code the gateway answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::InvalidRequest(_) => 400,
            LookupError::NotFound { .. } => 404,
            LookupError::UpstreamStatus { .. } => 500,
            LookupError::MalformedResponse { .. } => 500,
            LookupError::Transport(_) => 500,
        }
    }

    /// True for every failure caused by the provider or the network
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            LookupError::UpstreamStatus { .. }
                | LookupError::MalformedResponse { .. }
                | LookupError::Transport(_)
        )
    }

    /// HTTP status received from the provider, if the round trip got that far
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            LookupError::UpstreamStatus { status, .. } => Some(*status),
            LookupError::MalformedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body excerpt kept for diagnostics
    pub fn body_excerpt(&self) -> Option<&str> {
        match self {
            LookupError::UpstreamStatus { body_excerpt, .. } => Some(body_excerpt),
            LookupError::MalformedResponse { body_excerpt, .. } => Some(body_excerpt),
            _ => None,
        }
    }
}
