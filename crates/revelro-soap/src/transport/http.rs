//! HTTP transport adapter (reqwest)

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::{SoapRequest, SoapResponse, SoapTransport, TransportError};
use crate::config::RegCheckConfig;

/// Posts envelopes to the provider endpoint.
///
/// The underlying `Client` pools connections and is shared by every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a client with the configured request and connect timeouts
    pub fn new(config: &RegCheckConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransportError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn post(&self, request: &SoapRequest) -> Result<SoapResponse, TransportError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, request.content_type.as_str())
            .body(request.body.clone());

        if let Some(action) = &request.soap_action {
            builder = builder.header("SOAPAction", action.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "SOAP request failed");
            TransportError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "SOAP response body failed");
            TransportError::from(e)
        })?;

        debug!(status, bytes = body.len(), "SOAP response received");
        Ok(SoapResponse { status, body })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
