//! # Englog HTTP Service
//!
//! HTTP layer for receiving Slack webhooks and dispatching them into the
//! work-log pipeline.
//!
//! This service provides:
//! - The Slack webhook endpoint with signature verification
//! - Health and readiness endpoints
//! - Server startup with graceful shutdown
//!
//! The endpoint acknowledges within Slack's response deadline; all real work
//! (opening the form, resolving tickets, posting comments) runs in spawned
//! background tasks.

pub mod config;
pub mod errors;
pub mod responses;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use chrono::Utc;
use englog_core::{IncomingEvent, WorkCategory, WorkLogPipeline};
use slack_bot_sdk::views::work_log_modal;
use slack_bot_sdk::{SignatureVerifier, SlackClient, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use std::{collections::HashMap, sync::Arc};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, instrument};

pub use config::{
    LoggingConfig, ResolverConfig, ServerConfig, ServiceConfig, SlackConfig, TrackerConfig,
};
pub use errors::{ConfigError, DispatchError, ServiceError};
pub use responses::{
    DefaultHealthChecker, HealthCheckResult, HealthChecker, HealthResponse, HealthStatus,
    ReadinessResponse,
};

/// Path of the webhook endpoint Slack is configured to call.
pub const WEBHOOK_PATH: &str = "/slack/events";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: ServiceConfig,

    /// Verifier for inbound webhook signatures
    pub verifier: SignatureVerifier,

    /// Pipeline handling submitted work-log forms
    pub pipeline: Arc<WorkLogPipeline>,

    /// Slack client for opening the work-log form
    pub slack: SlackClient,

    /// Health checker for system monitoring
    pub health_checker: Arc<dyn HealthChecker>,
}

impl AppState {
    /// Create new application state
    ///
    /// The signature verifier is derived from the configured signing secret.
    pub fn new(
        config: ServiceConfig,
        pipeline: Arc<WorkLogPipeline>,
        slack: SlackClient,
        health_checker: Arc<dyn HealthChecker>,
    ) -> Self {
        let verifier = SignatureVerifier::new(config.slack.signing_secret.clone());
        Self {
            config,
            verifier,
            pipeline,
            slack,
            health_checker,
        }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let webhook_routes = Router::new().route(WEBHOOK_PATH, post(handle_slack_events));

    let health_routes = Router::new()
        .route("/health", get(handle_health_check))
        .route("/ready", get(handle_readiness_check));

    let mut app = Router::new()
        .merge(webhook_routes)
        .merge(health_routes)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_size));

    if state.config.server.enable_compression {
        app = app.layer(CompressionLayer::new());
    }
    if state.config.server.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Start HTTP server
///
/// Binds the configured address and serves until SIGINT or SIGTERM, then
/// drains in-flight requests before returning.
pub async fn start_server(
    config: ServiceConfig,
    pipeline: Arc<WorkLogPipeline>,
    slack: SlackClient,
    health_checker: Arc<dyn HealthChecker>,
) -> Result<(), ServiceError> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let shutdown_timeout = std::time::Duration::from_secs(config.server.shutdown_timeout_seconds);

    let state = AppState::new(config, pipeline, slack, health_checker);
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: bind_addr.clone(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", bind_addr);

    let shutdown_signal = async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown with {}s timeout", shutdown_timeout.as_secs());
            },
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown with {}s timeout", shutdown_timeout.as_secs());
            },
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

// ============================================================================
// Webhook Handler
// ============================================================================

/// Handle inbound Slack webhook requests
///
/// This handler implements the ack-before-work pattern to meet Slack's
/// 3-second response deadline:
/// 1. Verify the request signature over the raw body (fails closed)
/// 2. Classify the event from the form-encoded body
/// 3. Spawn the real work as a background task
/// 4. Return an empty 200 OK immediately
///
/// A verified but unrecognized event is acknowledged as a no-op so the
/// platform never retries it. An empty ack body matters: for slash commands
/// any response text is shown to the user verbatim.
#[instrument(skip(state, headers, body))]
pub async fn handle_slack_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, DispatchError> {
    // Convert headers to HashMap
    let header_map: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_lowercase(),
                v.to_str().unwrap_or("").to_string(),
            )
        })
        .collect();

    // Absent headers verify against empty strings and fail closed with the
    // same response as a mismatched digest.
    let timestamp = header_map
        .get(TIMESTAMP_HEADER)
        .map(String::as_str)
        .unwrap_or("");
    let signature = header_map
        .get(SIGNATURE_HEADER)
        .map(String::as_str)
        .unwrap_or("");

    if !state.verifier.verify(timestamp, signature, &body) {
        return Err(DispatchError::SignatureRejected);
    }

    let event = IncomingEvent::classify(&body);
    debug!(kind = event.kind(), "Classified webhook event");

    match event {
        IncomingEvent::FormRequest(command) => {
            info!(user = %command.user_id, command = %command.command, "Opening work-log form");
            let slack = state.slack.clone();
            tokio::spawn(async move {
                let modal = work_log_modal(WorkCategory::ALL.iter().map(|c| c.as_str()));
                if let Err(error) = slack.open_view(&command.trigger_id, &modal).await {
                    error!(error = %error, "Failed to open work-log form");
                }
            });
        }
        IncomingEvent::FormSubmission(submission) => {
            info!(user = %submission.user.id, "Dispatching work-log submission");
            let pipeline = state.pipeline.clone();
            tokio::spawn(async move {
                // The pipeline notifies the actor on every path; this log
                // is for operators.
                if let Err(error) = pipeline.handle_submission(&submission).await {
                    error!(
                        error = %error,
                        category = ?error.error_category(),
                        "Work-log submission failed"
                    );
                }
            });
        }
        IncomingEvent::Unknown => {
            debug!("Acknowledging unrecognized event as a no-op");
        }
    }

    Ok(StatusCode::OK)
}

// ============================================================================
// Health Handlers
// ============================================================================

/// Handle basic health check
pub async fn handle_health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let health = state.health_checker.check_health().await;
    let status = if health.is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if health.is_healthy {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            timestamp: Utc::now(),
            checks: health.checks,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Handle readiness check for load balancers
pub async fn handle_readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ready = state.health_checker.check_readiness().await;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            timestamp: Utc::now(),
        }),
    )
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
