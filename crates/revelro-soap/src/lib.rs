//! revelro-soap - RegCheck SOAP backend
//!
//! Implements `VehicleLookup` on top of the RegCheck SOAP service:
//!
//! - [`envelope`] builds SOAP 1.2 lookup and SOAP 1.1 credentials-check envelopes with
//!   every interpolated value XML-escaped
//! - [`xml`] converts provider XML into a JSON tree
//! - [`transport`] carries envelopes over HTTP (or a scripted mock)
//! - [`RegCheckBackend`] ties them together
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use revelro_soap::{config::RegCheckConfig, transport::HttpTransport, RegCheckBackend};
//!
//! let config = RegCheckConfig::new("my-account");
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! let backend = RegCheckBackend::new(config, transport);
//! let history = backend.lookup_vehicle_history("KL03Y1954").await?;
//! ```

mod backend;
pub mod config;
pub mod envelope;
pub mod error;
pub mod transport;
pub mod xml;

pub use backend::RegCheckBackend;
pub use config::RegCheckConfig;
pub use error::XmlError;

// Re-export core trait for convenience
pub use revelro_core::VehicleLookup;
