//! Integration tests for the HTTP connector using wiremock
//!
//! The connector is blocking, so each exercise runs on a blocking thread
//! while the mock server lives on the test runtime.

use redfish_model::{Connector, HttpConnector, Response};
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get(base: String, uri: String) -> anyhow::Result<Response> {
    tokio::task::spawn_blocking(move || HttpConnector::new(&base)?.get(&uri))
        .await
        .expect("blocking task panicked")
}

async fn get_with_token(base: String, uri: String, token: String) -> anyhow::Result<Response> {
    tokio::task::spawn_blocking(move || {
        HttpConnector::new(&base)?
            .with_bearer_token(token)
            .get(&uri)
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_success_returns_json() {
    let server = MockServer::start().await;

    let thermal = json!({
        "Id": "Thermal",
        "Name": "Blade Thermal",
        "Fans": [{"MemberId": "0", "Reading": 6000}]
    });

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Chassis/Blade1/Thermal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&thermal))
        .mount(&server)
        .await;

    let response = get(
        server.uri(),
        "/redfish/v1/Chassis/Blade1/Thermal".to_string(),
    )
    .await
    .expect("Request should succeed");

    let doc = response.json().expect("Should parse JSON");
    assert_eq!(doc["Id"], "Thermal");
    assert_eq!(doc["Fans"][0]["Reading"], 6000);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Registries"))
        .and(bearer_token("session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Members": []})))
        .mount(&server)
        .await;

    let response = get_with_token(
        server.uri(),
        "/redfish/v1/Registries".to_string(),
        "session-token".to_string(),
    )
    .await
    .expect("Request should succeed");

    assert!(response.json().is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_404_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redfish/v1/Chassis/Missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "Base.1.0.ResourceMissingAtURI"}
        })))
        .mount(&server)
        .await;

    let err = get(server.uri(), "/redfish/v1/Chassis/Missing".to_string())
        .await
        .expect_err("Request should fail");

    assert!(err.to_string().contains("404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_body_round_trips() {
    let server = MockServer::start().await;

    let payload = vec![0x50, 0x4b, 0x03, 0x04, 0xff, 0x00, 0x7f];
    Mock::given(method("GET"))
        .and(path("/redfish/v1/Registries/Archive.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let response = get(
        server.uri(),
        "/redfish/v1/Registries/Archive.zip".to_string(),
    )
    .await
    .expect("Request should succeed");

    assert_eq!(response.bytes(), payload.as_slice());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_absolute_uri_bypasses_base_url() {
    let public_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Registries/Test.1.0.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": "Test.1.0.0"})))
        .mount(&public_server)
        .await;

    // Base URL points nowhere; the absolute URI must win.
    let response = get(
        "https://bmc.invalid".to_string(),
        format!("{}/Registries/Test.1.0.json", public_server.uri()),
    )
    .await
    .expect("Request should succeed");

    assert_eq!(response.json().unwrap()["Id"], "Test.1.0.0");
}
