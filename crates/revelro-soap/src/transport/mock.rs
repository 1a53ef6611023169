//! Mock transport adapter for testing

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::{SoapRequest, SoapResponse, SoapTransport, TransportError};
use crate::config::MockConfig;

/// Vehicle record used by the default mock answer
pub const SAMPLE_VEHICLE_XML: &str = "<Description>MARUTI SWIFT DZIRE VXI</Description>\
<RegistrationYear>2012</RegistrationYear>\
<CarMake><CurrentTextValue>MARUTI</CurrentTextValue></CarMake>\
<CarModel>SWIFT DZIRE</CarModel>\
<EngineSize><CurrentTextValue>1197</CurrentTextValue></EngineSize>\
<FuelType><CurrentTextValue>PETROL</CurrentTextValue></FuelType>\
<Location>RTO, THRISSUR</Location>";

/// SOAP 1.2 response envelope whose result element wraps `result_xml`
pub fn lookup_response_envelope(operation: &str, result_xml: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Body>
    <{op}Response xmlns="http://regcheck.org.uk">
      <{op}Result>{result}</{op}Result>
    </{op}Response>
  </soap:Body>
</soap:Envelope>"#,
        op = operation,
        result = result_xml
    )
}

/// Well-formed SOAP 1.2 response envelope with no result element
pub fn empty_response_envelope(operation: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope">
  <soap:Body>
    <{op}Response xmlns="http://regcheck.org.uk" />
  </soap:Body>
</soap:Envelope>"#,
        op = operation
    )
}

/// Mock transport adapter for testing
///
/// Answers from a queue of scripted results first, then falls back to a
/// default response. Every call is counted and recorded.
pub struct MockTransport {
    config: MockConfig,
    connected: AtomicBool,
    calls: AtomicUsize,
    requests: RwLock<Vec<SoapRequest>>,
    scripted: Mutex<VecDeque<Result<SoapResponse, TransportError>>>,
    default_response: RwLock<SoapResponse>,
}

impl MockTransport {
    /// Mock that answers every request with the sample vehicle record
    pub fn new(config: &MockConfig) -> Self {
        Self::with_default(
            config,
            SoapResponse::new(200, lookup_response_envelope("CheckIndia", SAMPLE_VEHICLE_XML)),
        )
    }

    /// Mock that answers every request with a fixed status and body
    pub fn with_response(status: u16, body: impl Into<String>) -> Self {
        Self::with_default(&MockConfig::default(), SoapResponse::new(status, body))
    }

    fn with_default(config: &MockConfig, response: SoapResponse) -> Self {
        Self {
            config: config.clone(),
            connected: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
            requests: RwLock::new(Vec::new()),
            scripted: Mutex::new(VecDeque::new()),
            default_response: RwLock::new(response),
        }
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, response: SoapResponse) {
        self.scripted.lock().push_back(Ok(response));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, error: TransportError) {
        self.scripted.lock().push_back(Err(error));
    }

    /// Set connection state; a disconnected mock fails every call
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Number of `post` calls so far, including failed ones
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<SoapRequest> {
        self.requests.read().clone()
    }

    pub fn last_request(&self) -> Option<SoapRequest> {
        self.requests.read().last().cloned()
    }
}

#[async_trait]
impl SoapTransport for MockTransport {
    async fn post(&self, request: &SoapRequest) -> Result<SoapResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().push(request.clone());

        if !self.connected.load(Ordering::SeqCst) {
            return Err(TransportError::ConnectionClosed);
        }

        // Simulate latency
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        tracing::debug!(bytes = request.body.len(), "Mock transport: request received");

        let scripted = self.scripted.lock().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.default_response.read().clone()),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://regcheck"
    }
}
