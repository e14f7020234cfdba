//! Slack Web API client for authenticated operations.
//!
//! This module provides the `SlackClient` for the handful of Web API methods
//! the bot needs: opening modals (`views.open`), resolving workspace email
//! addresses (`users.info`), and sending direct messages (`chat.postMessage`).
//!
//! Slack reports failures in two layers: the HTTP status of the response and
//! an `{"ok": false, "error": "..."}` envelope inside a 200. Both layers are
//! surfaced as distinct `SlackApiError` variants.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors during Slack Web API operations.
#[derive(Debug, Error)]
pub enum SlackApiError {
    /// The HTTP client could not be constructed.
    #[error("Client configuration error: {message}")]
    Configuration { message: String },

    /// The request could not be sent or the connection failed mid-flight.
    #[error("Transport error calling {method}: {message}")]
    Transport { method: String, message: String },

    /// Slack answered with a non-success HTTP status.
    #[error("HTTP {status} from {method}")]
    Http { method: String, status: u16 },

    /// Slack answered `ok: false` with a platform error code.
    #[error("Slack API error from {method}: {error}")]
    Api { method: String, error: String },

    /// The response body could not be parsed as the expected envelope.
    #[error("Invalid response from {method}: {message}")]
    InvalidResponse { method: String, message: String },

    /// The response parsed but lacked a field the caller needs.
    #[error("Response from {method} is missing {field}")]
    MissingField { method: String, field: String },
}

impl SlackApiError {
    /// Check if this error represents a transient condition that may succeed
    /// if retried.
    ///
    /// Transient conditions include server errors (5xx), rate limiting (429),
    /// and network/transport failures. Platform errors such as
    /// `invalid_trigger_id` or `user_not_found` are not transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Configuration { .. } => false,
            Self::Transport { .. } => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Api { .. } => false,
            Self::InvalidResponse { .. } => false,
            Self::MissingField { .. } => false,
        }
    }
}

/// Configuration for Slack Web API client behavior.
///
/// # Examples
///
/// ```
/// use slack_bot_sdk::SlackClientConfig;
/// use std::time::Duration;
///
/// let config = SlackClientConfig::default().with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct SlackClientConfig {
    /// Slack Web API base URL
    pub base_url: String,
    /// Request timeout duration
    pub timeout: Duration,
}

impl Default for SlackClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://slack.com/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl SlackClientConfig {
    /// Set the Web API base URL.
    ///
    /// Primarily useful for pointing the client at a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Slack Web API client authenticated with a bot token.
///
/// # Examples
///
/// ```no_run
/// # use slack_bot_sdk::{SlackClient, SlackClientConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SlackClient::new("xoxb-1234-abcd", SlackClientConfig::default())?;
/// let email = client.user_email("U12345678").await?;
/// println!("resolved {}", email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SlackClient {
    http_client: reqwest::Client,
    config: SlackClientConfig,
    bot_token: String,
}

impl SlackClient {
    /// Create a new client from a bot token and configuration.
    ///
    /// # Errors
    ///
    /// Returns `SlackApiError::Configuration` if the HTTP client cannot be
    /// created.
    pub fn new(
        bot_token: impl Into<String>,
        config: SlackClientConfig,
    ) -> Result<Self, SlackApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SlackApiError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
            bot_token: bot_token.into(),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &SlackClientConfig {
        &self.config
    }

    /// Open a modal view in response to a slash command.
    ///
    /// The `trigger_id` comes from the slash command payload and expires a few
    /// seconds after Slack issues it, so this must be called promptly.
    ///
    /// # Errors
    ///
    /// Returns `SlackApiError` if the request fails, Slack answers a
    /// non-success status, or the platform rejects the call (for example
    /// `invalid_trigger_id` on an expired trigger).
    pub async fn open_view(
        &self,
        trigger_id: &str,
        view: &serde_json::Value,
    ) -> Result<(), SlackApiError> {
        debug!(trigger_id = %trigger_id, "Opening modal view");

        let url = format!("{}/views.open", self.config.base_url);
        let body = serde_json::json!({
            "trigger_id": trigger_id,
            "view": view,
        });

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| SlackApiError::Transport {
                method: "views.open".to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SlackApiError::Http {
                method: "views.open".to_string(),
                status: response.status().as_u16(),
            });
        }

        let envelope = response.json::<ApiEnvelope>().await.map_err(|e| {
            SlackApiError::InvalidResponse {
                method: "views.open".to_string(),
                message: format!("Failed to parse response: {}", e),
            }
        })?;

        if !envelope.ok {
            return Err(SlackApiError::Api {
                method: "views.open".to_string(),
                error: envelope
                    .error
                    .unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        Ok(())
    }

    /// Look up the workspace email address for a user id.
    ///
    /// Calls `users.info` and reads `user.profile.email`. Workspaces can
    /// withhold the email when the app lacks the `users:read.email` scope;
    /// that surfaces as `SlackApiError::MissingField`.
    ///
    /// # Errors
    ///
    /// Returns `SlackApiError` if the request fails, the user does not exist,
    /// or the profile carries no email address.
    pub async fn user_email(&self, user_id: &str) -> Result<String, SlackApiError> {
        debug!(user_id = %user_id, "Resolving user email");

        let url = format!("{}/users.info", self.config.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("user", user_id)])
            .header("Authorization", format!("Bearer {}", self.bot_token))
            .send()
            .await
            .map_err(|e| SlackApiError::Transport {
                method: "users.info".to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SlackApiError::Http {
                method: "users.info".to_string(),
                status: response.status().as_u16(),
            });
        }

        let envelope = response.json::<UserInfoEnvelope>().await.map_err(|e| {
            SlackApiError::InvalidResponse {
                method: "users.info".to_string(),
                message: format!("Failed to parse response: {}", e),
            }
        })?;

        if !envelope.ok {
            return Err(SlackApiError::Api {
                method: "users.info".to_string(),
                error: envelope
                    .error
                    .unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        envelope
            .user
            .and_then(|user| user.profile)
            .and_then(|profile| profile.email)
            .ok_or_else(|| SlackApiError::MissingField {
                method: "users.info".to_string(),
                field: "user.profile.email".to_string(),
            })
    }

    /// Send a message to a channel or user.
    ///
    /// Passing a user id as `channel` makes Slack deliver the message to the
    /// app's direct-message conversation with that user.
    ///
    /// # Errors
    ///
    /// Returns `SlackApiError` if the request fails or the platform rejects
    /// the call.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackApiError> {
        debug!(channel = %channel, "Posting message");

        let url = format!("{}/chat.postMessage", self.config.base_url);
        let body = serde_json::json!({
            "channel": channel,
            "text": text,
        });

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.bot_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| SlackApiError::Transport {
                method: "chat.postMessage".to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SlackApiError::Http {
                method: "chat.postMessage".to_string(),
                status: response.status().as_u16(),
            });
        }

        let envelope = response.json::<ApiEnvelope>().await.map_err(|e| {
            SlackApiError::InvalidResponse {
                method: "chat.postMessage".to_string(),
                message: format!("Failed to parse response: {}", e),
            }
        })?;

        if !envelope.ok {
            return Err(SlackApiError::Api {
                method: "chat.postMessage".to_string(),
                error: envelope
                    .error
                    .unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("config", &self.config)
            .field("bot_token", &"<REDACTED>")
            .finish()
    }
}

/// Minimal `{ok, error}` envelope shared by mutating Web API methods.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfoEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user: Option<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    email: Option<String>,
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
