//! Revelro HTTP client implementation

use std::time::Duration;

use reqwest::{Client, StatusCode};
use revelro_core::{CredentialsCheck, LookupRequest, VehicleHistory};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Result, RevelroClientError};
use crate::types::*;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway REST API client
#[derive(Debug, Clone)]
pub struct RevelroClient {
    client: Client,
    base_url: Url,
}

impl RevelroClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the gateway (e.g., "http://localhost:3001")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Health Check
    // =========================================================================

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    // =========================================================================
    // Registration Lookups
    // =========================================================================

    /// Look up a registration number.
    ///
    /// The number is sent as given; the gateway rejects blank input with a
    /// 400 before contacting the provider.
    #[instrument(skip(self))]
    pub async fn vehicle_history(&self, vehicle_number: &str) -> Result<VehicleHistory> {
        let url = self.base_url.join("/api/vehicle-history")?;
        debug!("Looking up {} via {}", vehicle_number, url);

        let request = LookupRequest::new(vehicle_number);
        let response = self.client.post(url).json(&request).send().await?;
        self.handle_response::<VehicleHistoryResponse>(response)
            .await
            .map(|r| r.data)
    }

    /// Run the provider credentials check
    #[instrument(skip(self))]
    pub async fn test_credentials(&self) -> Result<CredentialsCheck> {
        let url = self.base_url.join("/api/test-credentials")?;
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Handle response and deserialize JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| RevelroClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> RevelroClientError {
        // Try to parse error response body
        match response.json::<ErrorResponse>().await {
            Ok(err) => RevelroClientError::api(status.as_u16(), err.error, err.details),
            Err(_) => RevelroClientError::api(status.as_u16(), format!("HTTP {}", status), None),
        }
    }
}
