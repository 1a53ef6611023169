//! Test utilities for revelro-client
//!
//! [`TestServer`] runs a complete gateway in-process on an ephemeral port and
//! hands back a client already pointed at it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use revelro_api::{create_router, AppState};
use revelro_core::VehicleLookup;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{Result, RevelroClient};

/// Client request timeout; lookups against local mocks answer well within it
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// An in-process gateway, stopped when dropped
pub struct TestServer {
    addr: SocketAddr,
    pub client: RevelroClient,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Serve the gateway API over `lookup`
    ///
    /// ```ignore
    /// let server = TestServer::with_lookup(Arc::new(backend)).await?;
    /// let history = server.client.vehicle_history("KL03Y1954").await?;
    /// ```
    pub async fn with_lookup(lookup: Arc<dyn VehicleLookup>) -> Result<Self> {
        let router = create_router(AppState::new(lookup));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (stop, stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = stopped.await;
            });
            if let Err(e) = serve.await {
                tracing::warn!("Test gateway stopped with error: {}", e);
            }
        });

        let client =
            RevelroClient::with_config(&format!("http://{}", addr), REQUEST_TIMEOUT, CONNECT_TIMEOUT)?;

        Ok(Self {
            addr,
            client,
            stop: Some(stop),
            task,
        })
    }

    /// Absolute URL of a gateway path, for requests the typed client cannot make
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.abort();
    }
}
