//! Provider credentials diagnostic handler

use axum::extract::State;
use axum::Json;
use revelro_core::CredentialsCheck;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/test-credentials
///
/// Returns the provider's raw answer with a status-based verdict. Only a
/// transport failure turns into an error response.
pub async fn test_credentials(
    State(state): State<AppState>,
) -> Result<Json<CredentialsCheck>, ApiError> {
    let check = state
        .lookup()
        .test_credentials()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(check))
}
