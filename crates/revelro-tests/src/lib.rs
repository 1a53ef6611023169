//! End-to-end tests for the Revelro gateway
//!
//! Every test runs three real components on ephemeral ports:
//! - a mock RegCheck SOAP endpoint ([`MockUpstream`])
//! - the gateway router over the HTTP transport
//! - a `RevelroClient` (or raw `reqwest`) talking to the gateway
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p revelro-tests
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use revelro_client::testing::TestServer;
use revelro_soap::transport::mock::{lookup_response_envelope, SAMPLE_VEHICLE_XML};
use revelro_soap::transport::HttpTransport;
use revelro_soap::{RegCheckBackend, RegCheckConfig};

/// Path the mock upstream serves, mirroring the real service
pub const UPSTREAM_PATH: &str = "/api/reg.asmx";

/// Account used by every test gateway
pub const TEST_USERNAME: &str = "jou1";

/// A request as the upstream received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub soap_action: Option<String>,
    pub body: String,
}

struct UpstreamState {
    hits: AtomicUsize,
    response: Mutex<(u16, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Scriptable stand-in for the RegCheck SOAP endpoint
pub struct MockUpstream {
    addr: SocketAddr,
    state: Arc<UpstreamState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockUpstream {
    /// Start an upstream answering with the sample vehicle record
    pub async fn start() -> Self {
        Self::start_with(
            200,
            lookup_response_envelope("CheckIndia", SAMPLE_VEHICLE_XML),
        )
        .await
    }

    /// Start an upstream answering every request with `status` and `body`
    pub async fn start_with(status: u16, body: impl Into<String>) -> Self {
        let state = Arc::new(UpstreamState {
            hits: AtomicUsize::new(0),
            response: Mutex::new((status, body.into())),
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route(UPSTREAM_PATH, post(soap_endpoint))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Full SOAP endpoint URL
    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.addr, UPSTREAM_PATH)
    }

    /// Change the answer for subsequent requests
    pub fn set_response(&self, status: u16, body: impl Into<String>) {
        *self.state.response.lock() = (status, body.into());
    }

    /// Number of requests received
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn soap_endpoint(
    State(state): State<Arc<UpstreamState>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.requests.lock().push(RecordedRequest {
        content_type: header_text("content-type"),
        soap_action: header_text("soapaction"),
        body,
    });

    let (status, body) = state.response.lock().clone();
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/soap+xml; charset=utf-8")],
        body,
    )
}

/// Start a gateway whose provider points at `endpoint`
pub async fn start_gateway(endpoint: &str) -> TestServer {
    let config = RegCheckConfig::new(TEST_USERNAME).with_endpoint(endpoint);
    let transport = HttpTransport::new(&config).expect("build HTTP transport");
    let backend = RegCheckBackend::new(config, Arc::new(transport));

    TestServer::with_lookup(Arc::new(backend))
        .await
        .expect("start gateway")
}

/// An endpoint URL on a port with nothing listening
pub async fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind placeholder");
    let addr = listener.local_addr().expect("placeholder address");
    drop(listener);
    format!("http://{}{}", addr, UPSTREAM_PATH)
}
