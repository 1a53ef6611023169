//! Request and result types for registration lookups

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};

/// Message returned when the registration number is missing or blank
pub const VEHICLE_NUMBER_REQUIRED: &str = "Vehicle registration number is required";

/// Verdict when the credentials check got a 2xx answer
pub const CREDENTIALS_VALID_MESSAGE: &str = "Credentials appear valid";

/// Verdict when the credentials check got any other answer
pub const CREDENTIALS_INVALID_MESSAGE: &str = "Credentials may be invalid - check response";

/// Inbound lookup request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub vehicle_number: String,
}

impl LookupRequest {
    pub fn new(vehicle_number: impl Into<String>) -> Self {
        Self {
            vehicle_number: vehicle_number.into(),
        }
    }
}

/// Reject empty or whitespace-only registration numbers.
///
/// No other format rules are applied; the provider is the authority on
/// registration formats.
pub fn require_vehicle_number(vehicle_number: &str) -> LookupResult<&str> {
    if vehicle_number.trim().is_empty() {
        return Err(LookupError::InvalidRequest(
            VEHICLE_NUMBER_REQUIRED.to_string(),
        ));
    }
    Ok(vehicle_number)
}

/// Vehicle record returned by a successful lookup.
///
/// `raw_data` is whatever the provider's XML converts to. Its field set
/// varies by vehicle and market, so it is kept as an open JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleHistory {
    /// Registration number exactly as supplied by the caller
    pub vehicle_number: String,
    pub raw_data: serde_json::Value,
    /// RFC 3339 UTC timestamp with millisecond precision
    pub timestamp: String,
}

impl VehicleHistory {
    /// Wrap a provider payload, stamping it with the current time
    pub fn new(vehicle_number: impl Into<String>, raw_data: serde_json::Value) -> Self {
        Self::at(vehicle_number, raw_data, Utc::now())
    }

    pub fn at(
        vehicle_number: impl Into<String>,
        raw_data: serde_json::Value,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            vehicle_number: vehicle_number.into(),
            raw_data,
            timestamp: iso_timestamp(generated_at),
        }
    }

    /// Read a top-level string field from the raw payload, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.raw_data.get(name).and_then(|v| v.as_str())
    }
}

/// Format a timestamp like `2024-05-01T10:15:30.123Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Outcome of the provider credentials check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsCheck {
    /// HTTP status returned by the provider
    pub status: u16,
    /// Account identifier used for the check (masked)
    pub username: String,
    /// Raw response body, verbatim
    pub response: String,
    pub message: String,
}

impl CredentialsCheck {
    /// Build a check from a raw provider answer.
    ///
    /// The verdict depends on the HTTP status alone.
    pub fn from_response(status: u16, username: impl Into<String>, response: String) -> Self {
        let message = if (200..300).contains(&status) {
            CREDENTIALS_VALID_MESSAGE
        } else {
            CREDENTIALS_INVALID_MESSAGE
        };
        Self {
            status,
            username: username.into(),
            response,
            message: message.to_string(),
        }
    }

    pub fn appears_valid(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_require_vehicle_number() {
        assert_eq!(require_vehicle_number("KL03Y1954").unwrap(), "KL03Y1954");
        assert!(matches!(
            require_vehicle_number(""),
            Err(LookupError::InvalidRequest(_))
        ));
        assert!(matches!(
            require_vehicle_number("   "),
            Err(LookupError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T10:15:30.000Z");
    }

    #[test]
    fn test_vehicle_history_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap();
        let history = VehicleHistory::at(
            "KL03Y1954",
            serde_json::json!({ "Description": "MARUTI SWIFT DZIRE VXI" }),
            at,
        );
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["vehicleNumber"], "KL03Y1954");
        assert_eq!(json["rawData"]["Description"], "MARUTI SWIFT DZIRE VXI");
        assert_eq!(json["timestamp"], "2024-05-01T10:15:30.000Z");
        assert_eq!(history.field("Description"), Some("MARUTI SWIFT DZIRE VXI"));
    }

    #[test]
    fn test_credentials_verdict() {
        let ok = CredentialsCheck::from_response(200, "jo***", "<xml/>".into());
        assert!(ok.appears_valid());
        assert_eq!(ok.message, CREDENTIALS_VALID_MESSAGE);

        let bad = CredentialsCheck::from_response(500, "jo***", "fault".into());
        assert!(!bad.appears_valid());
        assert_eq!(bad.message, CREDENTIALS_INVALID_MESSAGE);
    }

    #[test]
    fn test_lookup_request_wire_name() {
        let req: LookupRequest =
            serde_json::from_str(r#"{"vehicleNumber":"KL03Y1954"}"#).unwrap();
        assert_eq!(req, LookupRequest::new("KL03Y1954"));
    }
}
