//! Wire types of the gateway API

use revelro_core::VehicleHistory;
use serde::{Deserialize, Serialize};

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Successful `POST /api/vehicle-history` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleHistoryResponse {
    pub success: bool,
    pub data: VehicleHistory,
}

/// Any error body the gateway sends.
///
/// Lookup endpoints may add `details`; the diagnostic endpoint sends only
/// `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}
