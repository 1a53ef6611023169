//! Vehicle history lookup handler

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use revelro_core::{VehicleHistory, VEHICLE_NUMBER_REQUIRED};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// Successful lookup body
#[derive(Debug, Serialize)]
pub struct VehicleHistoryResponse {
    pub success: bool,
    pub data: VehicleHistory,
}

/// Pull `vehicleNumber` out of a raw request body.
///
/// Missing, null, non-string and blank values are all "required" errors;
/// a body that is not JSON at all is reported separately.
fn parse_vehicle_number(body: &[u8]) -> Result<String, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest(VEHICLE_NUMBER_REQUIRED.to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    match value.get("vehicleNumber") {
        Some(Value::String(number)) if !number.trim().is_empty() => Ok(number.clone()),
        _ => Err(ApiError::BadRequest(VEHICLE_NUMBER_REQUIRED.to_string())),
    }
}

/// POST /api/vehicle-history
pub async fn lookup_vehicle_history(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VehicleHistoryResponse>, ApiError> {
    let vehicle_number = parse_vehicle_number(&body)?;

    let history = state
        .lookup()
        .lookup_vehicle_history(&vehicle_number)
        .await?;

    Ok(Json(VehicleHistoryResponse {
        success: true,
        data: history,
    }))
}
