//! Revelro Client Library
//!
//! Typed HTTP client for the registration lookup gateway.
//!
//! # Example
//!
//! ```rust,no_run
//! use revelro_client::RevelroClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), revelro_client::RevelroClientError> {
//!     let client = RevelroClient::new("http://localhost:3001")?;
//!
//!     let history = client.vehicle_history("KL03Y1954").await?;
//!     println!("{}", history.raw_data);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module serves the gateway API over any `VehicleLookup` on
//! an ephemeral port:
//!
//! ```rust,ignore
//! use revelro_client::testing::TestServer;
//!
//! let server = TestServer::with_lookup(Arc::new(backend)).await?;
//! let health = server.client.health().await?;
//! ```

mod client;
mod error;
pub mod testing;
mod types;

pub use client::RevelroClient;
pub use error::{Result, RevelroClientError};
pub use types::*;

// Re-export core types for convenience
pub use revelro_core::{CredentialsCheck, VehicleHistory};
