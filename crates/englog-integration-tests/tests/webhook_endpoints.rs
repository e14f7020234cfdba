//! Integration tests for the inbound webhook endpoint
//!
//! These tests drive the full router with signed HTTP requests and observe
//! the outbound traffic the service produces (or withholds) in response.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use common::{
    json_body, mount_slack_api, requests_to, sign, signed_request, slash_command_body,
    submission_body, test_router, wait_for_requests,
};
use englog_api::WEBHOOK_PATH;
use slack_bot_sdk::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

/// Verify that a signed slash command is acked and opens the work-log modal
///
/// The ack must carry an empty body so no visible message appears in the
/// channel; the modal open happens after the ack, keyed by the command's
/// trigger id.
#[tokio::test]
async fn test_slash_command_opens_the_work_log_modal() {
    // Arrange
    let server = MockServer::start().await;
    mount_slack_api(&server, "U123", "engineer@example.com").await;
    let app = test_router(&server);

    let trigger_id = "13345224609.738474920.8088930838d88f008e0";
    let body = slash_command_body("U123", trigger_id);

    // Act
    let response = app.oneshot(signed_request(&body)).await.unwrap();

    // Assert: silent ack
    assert_eq!(response.status(), StatusCode::OK);
    let ack_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(ack_body.is_empty(), "Ack body should be empty");

    // Assert: the modal is opened against the trigger id from the command
    let opens = wait_for_requests(&server, "/views.open", 1).await;
    let open_body = json_body(&opens[0]);
    assert_eq!(open_body["trigger_id"], trigger_id);
    assert_eq!(open_body["view"]["callback_id"], "log_modal");

    // Assert: the modal carries the three expected inputs
    let blocks = open_body["view"]["blocks"]
        .as_array()
        .expect("modal view should carry blocks");
    let block_ids: Vec<&str> = blocks
        .iter()
        .map(|block| block["block_id"].as_str().unwrap())
        .collect();
    assert_eq!(block_ids, vec!["category", "duration", "description"]);
}

/// Verify that a body altered after signing is rejected with no side effects
///
/// The signature covers the raw body, so changing a single field after
/// signing must produce a 403 and the service must not call either platform.
#[tokio::test]
async fn test_tampered_body_is_rejected_without_outbound_traffic() {
    // Arrange: sign the genuine submission, then tamper with the description
    let server = MockServer::start().await;
    mount_slack_api(&server, "U123", "engineer@example.com").await;
    let app = test_router(&server);

    let genuine = submission_body("U123", "Interviewing", "30m", "Panel interview");
    let timestamp = Utc::now().timestamp().to_string();
    let signature = sign(&timestamp, &genuine);
    let tampered = genuine.replace("Panel", "Rigged");
    assert_ne!(genuine, tampered, "Tampering must change the body");

    let request = Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("content-type", "application/x-www-form-urlencoded")
        .header(TIMESTAMP_HEADER, timestamp)
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(tampered))
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert: rejected, and nothing left the service
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let outbound = server.received_requests().await.unwrap_or_default();
    assert!(
        outbound.is_empty(),
        "Rejected requests must not trigger outbound calls, saw {}",
        outbound.len()
    );
}

/// Verify that a correctly signed but stale request is rejected
///
/// Replayed requests older than the accepted skew window are refused even
/// though their signature verifies.
#[tokio::test]
async fn test_stale_timestamp_is_rejected_without_outbound_traffic() {
    // Arrange: a valid signature over a timestamp just past the window
    let server = MockServer::start().await;
    mount_slack_api(&server, "U123", "engineer@example.com").await;
    let app = test_router(&server);

    let body = submission_body("U123", "Interviewing", "30m", "Panel interview");
    let stale = (Utc::now().timestamp() - 301).to_string();
    let signature = sign(&stale, &body);

    let request = Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("content-type", "application/x-www-form-urlencoded")
        .header(TIMESTAMP_HEADER, stale)
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(body))
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let outbound = server.received_requests().await.unwrap_or_default();
    assert!(
        outbound.is_empty(),
        "Stale requests must not trigger outbound calls, saw {}",
        outbound.len()
    );
}

/// Verify that unrecognized event shapes are acked and otherwise ignored
///
/// Slack retries on non-200 responses, so unknown payloads get a quiet 200
/// with no processing behind it.
#[tokio::test]
async fn test_unknown_event_is_acked_without_work() {
    // Arrange
    let server = MockServer::start().await;
    mount_slack_api(&server, "U123", "engineer@example.com").await;
    let app = test_router(&server);

    let body = "token=deadbeef&type=url_verification";

    // Act
    let response = app.oneshot(signed_request(body)).await.unwrap();

    // Assert: acked with an empty body
    assert_eq!(response.status(), StatusCode::OK);
    let ack_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(ack_body.is_empty(), "Ack body should be empty");

    // Assert: no pipeline work was started
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(requests_to(&server, "/views.open").await.is_empty());
    assert!(requests_to(&server, "/users.info").await.is_empty());
    assert!(requests_to(&server, "/chat.postMessage").await.is_empty());
}
