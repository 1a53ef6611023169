//! Gateway end-to-end tests
//!
//! Client → gateway (HTTP transport) → mock RegCheck endpoint, all over real
//! sockets.

use revelro_client::testing::TestServer;
use revelro_client::RevelroClientError;
use revelro_core::{
    CREDENTIALS_INVALID_MESSAGE, CREDENTIALS_VALID_MESSAGE, VEHICLE_NUMBER_REQUIRED,
};
use revelro_soap::transport::mock::{empty_response_envelope, lookup_response_envelope};
use revelro_tests::{refused_endpoint, start_gateway, MockUpstream};
use serde_json::{json, Value};

async fn post_raw(gateway: &TestServer, body: &'static str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(gateway.url("/api/vehicle-history"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_known_vehicle_lookup() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let history = gateway.client.vehicle_history("KL03Y1954").await.unwrap();

    assert_eq!(history.vehicle_number, "KL03Y1954");
    assert_eq!(history.raw_data["Description"], "MARUTI SWIFT DZIRE VXI");
    assert_eq!(history.raw_data["CarMake"]["CurrentTextValue"], "MARUTI");
    assert!(history.raw_data.as_object().is_some_and(|m| !m.is_empty()));
    assert_eq!(upstream.hits(), 1);

    let request = upstream.last_request().unwrap();
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/soap+xml; charset=utf-8")
    );
    assert!(request
        .body
        .contains("<RegistrationNumber>KL03Y1954</RegistrationNumber>"));
    assert!(request.body.contains("<username>jou1</username>"));
}

#[tokio::test]
async fn test_success_response_shape() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let (status, body) = post_raw(&gateway, r#"{"vehicleNumber":"KL03Y1954"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["vehicleNumber"], "KL03Y1954");
    assert!(body["data"]["rawData"].is_object());

    let timestamp = body["data"]["timestamp"].as_str().unwrap();
    // RFC 3339 UTC with milliseconds: 2026-01-01T00:00:00.000Z
    assert_eq!(timestamp.len(), 24);
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_empty_envelope_is_not_found() {
    let upstream = MockUpstream::start_with(200, empty_response_envelope("CheckIndia")).await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let err = gateway.client.vehicle_history("KL03Y1954").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn test_blank_result_is_not_found() {
    let upstream =
        MockUpstream::start_with(200, lookup_response_envelope("CheckIndia", "   ")).await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let err = gateway.client.vehicle_history("KL03Y1954").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_missing_registration_never_reaches_upstream() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    for payload in ["{}", r#"{"vehicleNumber":""}"#, r#"{"vehicleNumber":"   "}"#] {
        let (status, body) = post_raw(&gateway, payload).await;
        assert_eq!(status, 400, "payload {}", payload);
        assert_eq!(
            body,
            json!({ "success": false, "error": VEHICLE_NUMBER_REQUIRED })
        );
    }

    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_upstream_internal_error() {
    let upstream = MockUpstream::start_with(500, "Internal Server Error").await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    match gateway.client.vehicle_history("KL03Y1954").await.unwrap_err() {
        RevelroClientError::Api {
            status,
            error,
            details,
        } => {
            assert_eq!(status, 500);
            assert_eq!(error, "Failed to fetch vehicle history");
            let details = details.unwrap();
            assert!(details.contains("500"));
            // The provider body stays server-side
            assert!(!details.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_success_statuses_map_to_500() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    for code in [400u16, 401, 403, 404, 502, 503] {
        upstream.set_response(code, "nope");
        let err = gateway.client.vehicle_history("KL03Y1954").await.unwrap_err();
        match err {
            RevelroClientError::Api {
                status, details, ..
            } => {
                assert_eq!(status, 500, "upstream {}", code);
                assert!(details.unwrap().contains(&code.to_string()));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_unparseable_body_is_server_error() {
    let upstream = MockUpstream::start_with(200, "<html><body>maintenance").await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let err = gateway.client.vehicle_history("KL03Y1954").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_connection_refused() {
    let gateway = start_gateway(&refused_endpoint().await).await;

    match gateway.client.vehicle_history("KL03Y1954").await.unwrap_err() {
        RevelroClientError::Api {
            status,
            error,
            details,
        } => {
            assert_eq!(status, 500);
            assert_eq!(error, "Failed to fetch vehicle history");
            let details = details.unwrap();
            assert!(details.contains("provider unreachable"));
            assert!(!details.contains("127.0.0.1"));
            assert!(!details.contains("reg.asmx"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let first = gateway.client.vehicle_history("KL03Y1954").await.unwrap();
    let second = gateway.client.vehicle_history("KL03Y1954").await.unwrap();

    assert_eq!(
        serde_json::to_string(&first.raw_data).unwrap(),
        serde_json::to_string(&second.raw_data).unwrap()
    );
    assert!(second.timestamp >= first.timestamp);
    assert_eq!(upstream.hits(), 2);
}

#[tokio::test]
async fn test_registration_is_escaped_on_the_wire() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let hostile = "KL03</RegistrationNumber><username>x</username>";
    let history = gateway.client.vehicle_history(hostile).await.unwrap();
    assert_eq!(history.vehicle_number, hostile);

    let body = upstream.last_request().unwrap().body;
    assert!(body.contains("KL03&lt;/RegistrationNumber&gt;&lt;username&gt;x&lt;/username&gt;"));
    assert_eq!(body.matches("<username>").count(), 1);
}

#[tokio::test]
async fn test_concurrent_lookups() {
    let upstream = MockUpstream::start().await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let lookups = (0..8).map(|i| {
        let client = gateway.client.clone();
        tokio::spawn(async move { client.vehicle_history(&format!("KL03Y{:04}", i)).await })
    });

    for (i, handle) in lookups.collect::<Vec<_>>().into_iter().enumerate() {
        let history = handle.await.unwrap().unwrap();
        assert_eq!(history.vehicle_number, format!("KL03Y{:04}", i));
    }
    assert_eq!(upstream.hits(), 8);
}

// =============================================================================
// Credentials check
// =============================================================================

#[tokio::test]
async fn test_credentials_check_uses_soap11() {
    let upstream = MockUpstream::start_with(200, "<raw>ok</raw>").await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let check = gateway.client.test_credentials().await.unwrap();
    assert_eq!(check.status, 200);
    assert_eq!(check.username, "jo***");
    assert_eq!(check.response, "<raw>ok</raw>");
    assert_eq!(check.message, CREDENTIALS_VALID_MESSAGE);

    let request = upstream.last_request().unwrap();
    assert_eq!(
        request.content_type.as_deref(),
        Some("text/xml; charset=utf-8")
    );
    assert_eq!(
        request.soap_action.as_deref(),
        Some("http://regcheck.org.uk/CheckIndia")
    );
    assert!(request
        .body
        .contains("<RegistrationNumber>TEST123</RegistrationNumber>"));
}

#[tokio::test]
async fn test_credentials_check_reports_rejection() {
    let upstream = MockUpstream::start_with(500, "<soap:Fault/>").await;
    let gateway = start_gateway(&upstream.endpoint()).await;

    let check = gateway.client.test_credentials().await.unwrap();
    assert_eq!(check.status, 500);
    assert_eq!(check.response, "<soap:Fault/>");
    assert_eq!(check.message, CREDENTIALS_INVALID_MESSAGE);
}

#[tokio::test]
async fn test_credentials_check_unreachable() {
    let gateway = start_gateway(&refused_endpoint().await).await;

    let err = gateway.client.test_credentials().await.unwrap_err();
    match err {
        RevelroClientError::Api {
            status,
            error,
            details,
        } => {
            assert_eq!(status, 500);
            assert_eq!(error, "Transport error: Connection failed: provider unreachable");
            assert!(details.is_none());
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_needs_no_upstream() {
    let gateway = start_gateway(&refused_endpoint().await).await;

    let health = gateway.client.health().await.unwrap();
    assert_eq!(health.status, "ok");
}
