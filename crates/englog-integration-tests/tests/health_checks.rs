//! Integration tests for health check functionality

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::test_router;
use tower::ServiceExt;
use wiremock::MockServer;

/// Verify that the health endpoint reports a healthy service
#[tokio::test]
async fn test_health_endpoint_returns_200_when_healthy() {
    // Arrange
    let server = MockServer::start().await;
    let app = test_router(&server);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

/// Verify that the health endpoint returns the expected JSON structure
#[tokio::test]
async fn test_health_endpoint_response_structure() {
    // Arrange
    let server = MockServer::start().await;
    let app = test_router(&server);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type");
    assert!(content_type.is_some());
    let content_type_str = content_type.unwrap().to_str().unwrap();
    assert!(
        content_type_str.contains("application/json"),
        "Content-Type should be application/json, got: {}",
        content_type_str
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(
        body["version"].as_str().is_some_and(|v| !v.is_empty()),
        "Health response should carry a version"
    );
    assert_eq!(body["checks"]["service"]["healthy"], true);
}

/// Verify that the readiness endpoint reports ready
#[tokio::test]
async fn test_readiness_endpoint_reports_ready() {
    // Arrange
    let server = MockServer::start().await;
    let app = test_router(&server);

    let request = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ready"], true);
}
