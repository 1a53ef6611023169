//! revelro-core - Core traits and types for the registration lookup gateway
//!
//! This crate provides the provider-agnostic abstractions shared by the SOAP
//! backend, the HTTP API layer and the client.

pub mod error;
pub mod lookup;
pub mod models;
pub mod redact;

pub use error::{LookupError, LookupResult};
pub use lookup::VehicleLookup;
pub use models::*;
