//! Mock registry helpers
//!
//! Wiremock only speaks plain HTTP, so the HTTPS probe against it always
//! fails at the TLS handshake and the client falls back to HTTP.

use super::constants::*;
use serde_json::{json, Value};
use std::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `host:port` of the mock server, as used in image references
pub fn registry_host(server: &MockServer) -> String {
    format!("127.0.0.1:{}", server.address().port())
}

/// A `host:port` that refuses connections
pub fn closed_registry_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("127.0.0.1:{}", port)
}

/// `/v2/` answers 200 without a challenge
pub async fn mock_open_registry(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Docker-Distribution-Api-Version", "registry/2.0")
                .set_body_json(json!({})),
        )
        .mount(server)
        .await;
}

/// `/v2/` answers 401 with the given challenge and a standard error body
pub async fn mock_auth_registry(server: &MockServer, challenge: &str) {
    Mock::given(method("GET"))
        .and(path("/v2/"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("WWW-Authenticate", challenge)
                .insert_header("Docker-Distribution-Api-Version", "registry/2.0")
                .set_body_json(unauthorized_body()),
        )
        .mount(server)
        .await;
}

/// Serve a manifest body at `/v2/{repo}/manifests/{reference}`
///
/// Only matches requests carrying the distribution API version header.
pub async fn mock_manifest(server: &MockServer, repo: &str, reference: &str, body: &Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{}/manifests/{}", repo, reference)))
        .and(header("Docker-Distribution-API-Version", "registry/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve a manifest only to requests with the test basic credentials
pub async fn mock_manifest_with_basic_auth(
    server: &MockServer,
    repo: &str,
    reference: &str,
    body: &Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{}/manifests/{}", repo, reference)))
        .and(header("Authorization", TEST_BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer the manifest path with an arbitrary status and raw body
pub async fn mock_manifest_response(
    server: &MockServer,
    repo: &str,
    reference: &str,
    template: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{}/manifests/{}", repo, reference)))
        .respond_with(template)
        .mount(server)
        .await;
}

pub fn unauthorized_body() -> Value {
    json!({
        "errors": [{
            "code": "UNAUTHORIZED",
            "message": "authentication required",
            "detail": null
        }]
    })
}
