//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use revelro_core::LookupError;
use serde::Serialize;

/// Error text for a lookup with no matching record
pub const NOT_FOUND_MESSAGE: &str = "No vehicle data found for this registration number";

/// Error text for any provider-side failure
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch vehicle history";

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 500 with the generic lookup failure message and a details string
    LookupFailed { details: String },
    /// 500 Internal Server Error (bare `{ error }` body)
    Internal(String),
}

/// Failure body of the lookup endpoints
#[derive(Serialize)]
struct FailureResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Bare error body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, error, details) = match self {
            ApiError::Internal(message) => {
                tracing::error!(error = "internal_error", %message, "API error");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: message }),
                )
                    .into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::LookupFailed { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "lookup_failed",
                LOOKUP_FAILED_MESSAGE.to_string(),
                Some(details),
            ),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, details = ?details, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, message = %error, "API client error");
        }

        let body = Json(FailureResponse {
            success: false,
            error,
            details,
        });

        (status, body).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            LookupError::NotFound { .. } => ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            upstream => ApiError::LookupFailed {
                details: upstream.to_string(),
            },
        }
    }
}
