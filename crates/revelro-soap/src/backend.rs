//! RegCheckBackend - VehicleLookup over the RegCheck SOAP service

use std::sync::Arc;

use async_trait::async_trait;
use revelro_core::{
    require_vehicle_number, CredentialsCheck, LookupError, LookupResult, VehicleHistory,
    VehicleLookup,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::RegCheckConfig;
use crate::envelope;
use crate::transport::{SoapRequest, SoapResponse, SoapTransport};
use crate::xml;

/// Registration lookups against RegCheck.
///
/// Holds no per-request state. One instance serves every request.
pub struct RegCheckBackend {
    config: RegCheckConfig,
    transport: Arc<dyn SoapTransport>,
    masked_username: String,
}

impl RegCheckBackend {
    pub fn new(config: RegCheckConfig, transport: Arc<dyn SoapTransport>) -> Self {
        let masked_username = config.masked_username();
        Self {
            config,
            transport,
            masked_username,
        }
    }

    /// Interpret a 2xx lookup answer.
    ///
    /// Returns `Ok(None)` when the envelope is well-formed but carries no
    /// result payload.
    pub fn extract_vehicle_data(&self, response: &SoapResponse) -> LookupResult<Option<Value>> {
        let document = xml::xml_to_json(&response.body).map_err(|e| {
            LookupError::MalformedResponse {
                status: response.status,
                reason: e.to_string(),
                body_excerpt: response.excerpt().to_string(),
            }
        })?;

        if let Some(reason) = xml::soap_fault_reason(&document) {
            return Err(LookupError::MalformedResponse {
                status: response.status,
                reason: format!("SOAP fault: {}", reason),
                body_excerpt: response.excerpt().to_string(),
            });
        }

        let path = self.config.result_path();
        let path: Vec<&str> = path.iter().map(String::as_str).collect();

        Ok(xml::find_path(&document, &path)
            .filter(|payload| !xml::is_blank(payload))
            .cloned())
    }
}

#[async_trait]
impl VehicleLookup for RegCheckBackend {
    fn provider_name(&self) -> &str {
        "regcheck"
    }

    async fn lookup_vehicle_history(&self, vehicle_number: &str) -> LookupResult<VehicleHistory> {
        let vehicle_number = require_vehicle_number(vehicle_number)?;

        let body = envelope::soap12_lookup(
            &self.config.operation,
            &self.config.namespace,
            vehicle_number,
            &self.config.username,
        );

        info!(
            vehicle_number,
            operation = %self.config.operation,
            endpoint = %self.transport.endpoint(),
            "Fetching vehicle data"
        );

        let response = self
            .transport
            .post(&SoapRequest::soap12(body))
            .await
            .map_err(|e| {
                error!(vehicle_number, error = %e, "Provider request failed");
                LookupError::from(e)
            })?;

        info!(vehicle_number, status = response.status, "Provider response status");
        info!(preview = %response.excerpt(), "Provider response preview");

        if !response.is_success() {
            error!(
                status = response.status,
                body = %response.body,
                "Provider returned an error response"
            );
            return Err(LookupError::UpstreamStatus {
                status: response.status,
                body_excerpt: response.excerpt().to_string(),
            });
        }

        match self.extract_vehicle_data(&response)? {
            Some(raw_data) => {
                debug!(vehicle_number, raw_data = %raw_data, "Vehicle data structure");
                Ok(VehicleHistory::new(vehicle_number, raw_data))
            }
            None => {
                warn!(vehicle_number, "No vehicle data in provider response");
                Err(LookupError::NotFound {
                    vehicle_number: vehicle_number.to_string(),
                })
            }
        }
    }

    async fn test_credentials(&self) -> LookupResult<CredentialsCheck> {
        let body = envelope::soap11_credentials_check(
            &self.config.operation,
            &self.config.soap11_namespace,
            &self.config.username,
        );
        let request = SoapRequest::soap11(body, self.config.soap_action());

        info!(username = %self.masked_username, "Testing provider credentials");

        let response = self.transport.post(&request).await.map_err(|e| {
            error!(error = %e, "Credentials check failed");
            LookupError::from(e)
        })?;

        info!(status = response.status, "Credentials check status");

        Ok(CredentialsCheck::from_response(
            response.status,
            self.masked_username.clone(),
            response.body,
        ))
    }
}
