//! Application state for the gateway API

use std::sync::Arc;

use revelro_core::VehicleLookup;

/// Message reported by `/health`
pub const HEALTH_MESSAGE: &str = "Revelro API Server Running";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    lookup: Arc<dyn VehicleLookup>,
}

impl AppState {
    /// Create a new AppState around a lookup provider
    pub fn new(lookup: Arc<dyn VehicleLookup>) -> Self {
        Self { lookup }
    }

    /// Get the lookup provider
    pub fn lookup(&self) -> &Arc<dyn VehicleLookup> {
        &self.lookup
    }
}
