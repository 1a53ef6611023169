//! Transport layer for SOAP requests
//!
//! - HTTP adapter (reqwest) for the real provider
//! - Mock adapter for tests and demos

pub mod error;
mod http;
pub mod mock;

pub use error::TransportError;
pub use http::HttpTransport;
pub use mock::MockTransport;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{RegCheckConfig, TransportConfig};
use crate::envelope::{SOAP11_CONTENT_TYPE, SOAP12_CONTENT_TYPE};

/// Number of characters of a response body kept in previews and errors
pub const PREVIEW_CHARS: usize = 500;

/// An outbound SOAP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    pub content_type: String,
    /// `SOAPAction` header (SOAP 1.1 only)
    pub soap_action: Option<String>,
    pub body: String,
}

impl SoapRequest {
    /// SOAP 1.2 request; the action travels inside the content type, if at all
    pub fn soap12(body: String) -> Self {
        Self {
            content_type: SOAP12_CONTENT_TYPE.to_string(),
            soap_action: None,
            body,
        }
    }

    /// SOAP 1.1 request with an explicit `SOAPAction` header
    pub fn soap11(body: String, soap_action: String) -> Self {
        Self {
            content_type: SOAP11_CONTENT_TYPE.to_string(),
            soap_action: Some(soap_action),
            body,
        }
    }
}

/// Raw provider answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapResponse {
    pub status: u16,
    pub body: String,
}

impl SoapResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First [`PREVIEW_CHARS`] characters of the body
    pub fn excerpt(&self) -> &str {
        excerpt(&self.body, PREVIEW_CHARS)
    }
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Carries one SOAP request to the provider and returns its raw answer.
///
/// Any HTTP status is a successful round trip; only network-layer failures
/// are errors.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn post(&self, request: &SoapRequest) -> Result<SoapResponse, TransportError>;

    /// Where requests go (for logs)
    fn endpoint(&self) -> &str;
}

/// Create a transport based on configuration
pub fn create_transport(config: &RegCheckConfig) -> Result<Arc<dyn SoapTransport>, TransportError> {
    match &config.transport {
        TransportConfig::Http => Ok(Arc::new(HttpTransport::new(config)?)),
        TransportConfig::Mock(mock) => Ok(Arc::new(MockTransport::new(mock))),
    }
}
