/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for the TaskService implementation of GreenSpinClient
[POS]:    Integration tests - HTTP endpoints through the service seam
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::time::Duration;

use common::{client_for, sample_photo, sample_task_json, setup_mock_server};
use greenspin_adapter::{ClientConfig, GreenSpinClient, TaskService};
use rstest::rstest;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(GreenSpinClient::new());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        timeout: Some(Duration::from_secs(5)),
        ..ClientConfig::with_base_url("http://127.0.0.1:9000")
    };
    let client = assert_ok!(GreenSpinClient::with_config(config));
    assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9000/");
}

#[tokio::test]
async fn test_request_new_task_returns_payload_verbatim() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/create-task"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_task_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = assert_ok!(client.request_new_task().await);
    assert_eq!(payload.desc, "Plant a tree");
    assert_eq!(payload.task, "Reduces CO2");
    assert_eq!(payload.points, 50);
    assert_eq!(payload.value, "€5");
}

#[rstest]
#[case::server_error(ResponseTemplate::new(500))]
#[case::not_found(ResponseTemplate::new(404).set_body_string("Not Found"))]
#[case::non_json(ResponseTemplate::new(200).set_body_string("not json"))]
#[case::wrong_shape(ResponseTemplate::new(200).set_body_json(serde_json::json!({"desc": "x"})))]
#[tokio::test]
async fn test_request_new_task_failures_collapse(#[case] response: ResponseTemplate) {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/create-task"))
        .respond_with(response)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let failed = assert_err!(client.request_new_task().await);
    assert!(!failed.reason.is_empty());
}

#[tokio::test]
async fn test_request_new_task_transport_failure() {
    // Nothing listens on port 1, so the connection is refused
    let client = assert_ok!(GreenSpinClient::with_config(ClientConfig::with_base_url(
        "http://127.0.0.1:1"
    )));

    let failed = assert_err!(client.request_new_task().await);
    assert!(failed.reason.starts_with("HTTP request failed"));
}

#[tokio::test]
async fn test_request_timeout_is_enforced_when_configured() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/create-task"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_task_json())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        timeout: Some(Duration::from_millis(200)),
        ..ClientConfig::with_base_url(server.uri())
    };
    let client = assert_ok!(GreenSpinClient::with_config(config));
    let _failed = assert_err!(client.request_new_task().await);
}

#[tokio::test]
async fn test_submit_proof_sends_three_parts() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/validate-task"))
        .and(body_string_contains("name=\"task\"\r\n\r\nPlant a tree"))
        .and(body_string_contains("name=\"proof\"\r\n\r\ndone"))
        .and(body_string_contains("name=\"photo\"; filename=\"proof.jpg\""))
        .and(body_string_contains("JPEGBYTES"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "Verified",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let photo = sample_photo();
    let verdict = assert_ok!(
        client
            .submit_proof(Some("Plant a tree"), "done", Some(&photo))
            .await
    );
    assert_eq!(verdict, "Verified");
}

#[tokio::test]
async fn test_submit_proof_failure() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/validate-task"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let photo = sample_photo();
    let failed = assert_err!(client.submit_proof(Some("t"), "done", Some(&photo)).await);
    assert!(failed.reason.contains("502"));
}
