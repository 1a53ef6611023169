//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::state::HEALTH_MESSAGE;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: HEALTH_MESSAGE.to_string(),
    })
}
