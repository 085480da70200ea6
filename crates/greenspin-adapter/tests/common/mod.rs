/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for greenspin-adapter tests

use greenspin_adapter::{ClientConfig, GreenSpinClient, PhotoAttachment};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> GreenSpinClient {
    GreenSpinClient::with_config(ClientConfig::with_base_url(server.uri()))
        .expect("client init")
}

/// Small ASCII-only "image" so multipart bodies stay matchable as text
pub fn sample_photo() -> PhotoAttachment {
    PhotoAttachment::from_bytes("proof.jpg", b"JPEGBYTES".to_vec())
}

pub fn sample_task_json() -> serde_json::Value {
    serde_json::json!({
        "desc": "Plant a tree",
        "task": "Reduces CO2",
        "points": 50,
        "value": "€5",
    })
}
