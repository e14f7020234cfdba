//! Error types for Jira REST operations.

use thiserror::Error;

/// Errors during Jira REST API operations.
///
/// Non-success HTTP statuses map onto dedicated variants so callers can
/// distinguish credential problems from transient outages without inspecting
/// status codes themselves.
#[derive(Debug, Error)]
pub enum JiraApiError {
    /// The HTTP client could not be constructed.
    #[error("Client configuration error: {message}")]
    Configuration { message: String },

    /// The request could not be sent or the connection failed mid-flight.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Jira rejected the request as malformed (400).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The configured credentials were rejected (401).
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The account lacks permission for the operation (403).
    #[error("Authorization failed")]
    AuthorizationFailed,

    /// The addressed resource does not exist (404).
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-success HTTP status.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// The response body could not be parsed as the expected shape.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl JiraApiError {
    /// Check if this error represents a transient condition that may succeed
    /// if retried.
    ///
    /// Transient conditions include server errors (5xx), rate limiting (429),
    /// and network/transport errors. Credential and request-shape problems
    /// are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Configuration { .. } => false,
            Self::Transport { .. } => true,
            Self::InvalidRequest { .. } => false,
            Self::AuthenticationFailed => false,
            Self::AuthorizationFailed => false,
            Self::NotFound { .. } => false,
            Self::HttpError { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidResponse { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
