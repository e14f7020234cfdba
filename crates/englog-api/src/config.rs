//! Configuration types for the HTTP service.
//!
//! Every field carries a serde default so partial config files and bare
//! environments deserialize cleanly; [`ServiceConfig::validate`] then decides
//! whether the result is actually runnable. Secrets never appear in `Debug`
//! output.

use englog_core::PeriodPolicy;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Chat platform settings
    pub slack: SlackConfig,

    /// Issue tracker settings
    pub tracker: TrackerConfig,

    /// Ticket resolution settings
    pub resolver: ResolverConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Check that the configuration is runnable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for absent required settings and
    /// `ConfigError::Invalid` for present-but-unusable ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must be non-zero".to_string(),
            });
        }
        if self.slack.bot_token.is_empty() {
            return Err(ConfigError::Missing {
                key: "slack.bot_token".to_string(),
            });
        }
        if self.slack.signing_secret.is_empty() {
            return Err(ConfigError::Missing {
                key: "slack.signing_secret".to_string(),
            });
        }
        if self.tracker.base_url.is_empty() {
            return Err(ConfigError::Missing {
                key: "tracker.base_url".to_string(),
            });
        }
        if !self.tracker.base_url.starts_with("http://")
            && !self.tracker.base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                message: format!(
                    "tracker.base_url must be an http(s) URL, got '{}'",
                    self.tracker.base_url
                ),
            });
        }
        if self.tracker.email.is_empty() {
            return Err(ConfigError::Missing {
                key: "tracker.email".to_string(),
            });
        }
        if !self.tracker.email.contains('@') {
            return Err(ConfigError::Invalid {
                message: "tracker.email must be an email address".to_string(),
            });
        }
        if self.tracker.api_token.is_empty() {
            return Err(ConfigError::Missing {
                key: "tracker.api_token".to_string(),
            });
        }
        if self.tracker.project_key.is_empty() {
            return Err(ConfigError::Missing {
                key: "tracker.project_key".to_string(),
            });
        }
        // A typoed level would otherwise produce an empty log filter and
        // silence the service.
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "logging.level must be one of trace, debug, info, warn, error; got '{}'",
                    self.logging.level
                ),
            });
        }
        Ok(())
    }

    /// Apply the well-known deployment environment variables on top of the
    /// loaded configuration.
    ///
    /// These are the flat names operations teams already set for this kind
    /// of bridge (`SLACK_BOT_TOKEN`, `JIRA_BASE_URL`, ...); they take
    /// precedence over file and prefixed-environment sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when `PORT` is set but not a valid
    /// port number.
    pub fn apply_well_known_env(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = non_empty_env("SLACK_BOT_TOKEN") {
            self.slack.bot_token = value;
        }
        if let Some(value) = non_empty_env("SLACK_SIGNING_SECRET") {
            self.slack.signing_secret = value;
        }
        if let Some(value) = non_empty_env("JIRA_BASE_URL") {
            self.tracker.base_url = value;
        }
        if let Some(value) = non_empty_env("JIRA_EMAIL") {
            self.tracker.email = value;
        }
        if let Some(value) = non_empty_env("JIRA_API_TOKEN") {
            self.tracker.api_token = value;
        }
        if let Some(value) = non_empty_env("JIRA_PROJECT_KEY") {
            self.tracker.project_key = value;
        }
        if let Some(value) = non_empty_env("PORT") {
            self.server.port = value.parse().map_err(|_| ConfigError::Invalid {
                message: format!("PORT must be a port number, got '{}'", value),
            })?;
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,

    /// Maximum request size in bytes
    pub max_body_size: usize,

    /// Enable CORS
    pub enable_cors: bool,

    /// Enable compression
    pub enable_compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout_seconds: 30,
            max_body_size: 1024 * 1024, // 1MB, form payloads are small
            enable_cors: false,
            enable_compression: true,
        }
    }
}

/// Chat platform configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot token for Web API calls (`xoxb-...`)
    pub bot_token: String,

    /// Signing secret for webhook signature verification
    pub signing_secret: String,
}

// Security: don't expose credentials in debug output
impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &"<REDACTED>")
            .field("signing_secret", &"<REDACTED>")
            .finish()
    }
}

/// Issue tracker configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the tracker instance
    pub base_url: String,

    /// Account email for basic authentication
    pub email: String,

    /// API token paired with the email
    pub api_token: String,

    /// Project that receives work-log tickets
    pub project_key: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            project_key: "ENGLOG".to_string(),
        }
    }
}

// Security: don't expose the API token in debug output
impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<REDACTED>")
            .field("project_key", &self.project_key)
            .finish()
    }
}

/// Ticket resolution configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Ticket bucketing policy (`lifetime` or `monthly`)
    pub period: PeriodPolicy,
}

/// Logging configuration
///
/// Logs go to stdout; routing them to files is the supervisor's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
