//! Integration tests for the HTTP submitter against a mock login endpoint.

use std::time::Duration;

use signin_core::auth::{AuthSubmitter, Credentials, HttpSubmitter, SubmitOutcome};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        email: "user@example.com".to_string(),
        password: "secret1".to_string(),
    }
}

fn submitter_for(server: &MockServer) -> HttpSubmitter {
    HttpSubmitter::new(format!("{}/login", server.uri()), Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_success_status_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "email": "user@example.com",
            "password": "secret1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = submitter_for(&server).submit(credentials()).await;

    assert_eq!(outcome, SubmitOutcome::Success);
}

#[tokio::test]
async fn test_unauthorized_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let outcome = submitter_for(&server).submit(credentials()).await;

    assert_eq!(outcome, SubmitOutcome::InvalidCredentials);
}

#[tokio::test]
async fn test_server_error_is_service_error_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"error": {"message": "maintenance"}})),
        )
        .mount(&server)
        .await;

    let outcome = submitter_for(&server).submit(credentials()).await;

    assert_eq!(
        outcome,
        SubmitOutcome::service_error("HTTP 503: maintenance")
    );
}

#[tokio::test]
async fn test_slow_backend_times_out_as_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let submitter = HttpSubmitter::new(
        format!("{}/login", server.uri()),
        Some(Duration::from_millis(100)),
    )
    .unwrap();
    let outcome = submitter.submit(credentials()).await;

    match outcome {
        SubmitOutcome::ServiceError { detail } => assert!(detail.contains("timed out")),
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_service_error() {
    // Nothing listens on the discard port.
    let submitter =
        HttpSubmitter::new("http://127.0.0.1:9/login", Some(Duration::from_secs(2))).unwrap();

    let outcome = submitter.submit(credentials()).await;

    assert!(matches!(outcome, SubmitOutcome::ServiceError { .. }));
}
