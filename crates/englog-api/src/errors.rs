//! Error types for the HTTP service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

/// Dispatcher errors with HTTP status code mapping
///
/// The webhook endpoint has exactly two failure surfaces:
///
/// - `403 Forbidden`: the request failed signature verification. Missing
///   headers, malformed signatures, stale timestamps, and digest mismatches
///   are all reported identically so the response leaks nothing about which
///   check failed.
/// - `500 Internal Server Error`: unexpected server failure. Details stay in
///   the logs; the client sees a generic message.
///
/// Everything that verifies is acknowledged `200 OK` before any real work
/// happens, so processing failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request could not be authenticated as coming from the platform
    #[error("Request signature verification failed")]
    SignatureRejected,

    /// Unexpected internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::SignatureRejected => {
                warn!("Rejected webhook with bad or missing signature");
                (StatusCode::FORBIDDEN, self.to_string())
            }
            Self::Internal { ref message } => {
                error!(error = %message, "Internal server error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error occurred. Please try again later.".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (status, Json(body)).into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {key}")]
    Missing { key: String },
}
