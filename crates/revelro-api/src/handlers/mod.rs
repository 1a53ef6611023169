//! HTTP request handlers for the gateway API
//!
//! These handlers use the VehicleLookup trait and are provider-agnostic.

pub mod credentials;
pub mod health;
pub mod vehicle_history;
