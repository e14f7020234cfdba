//! Jira REST client for authenticated operations.
//!
//! This module provides the `JiraClient` for the three operations the bridge
//! performs against Jira Cloud: searching issues by JQL, creating issues, and
//! appending comments. All calls use HTTP basic auth (account email + API
//! token) and a bounded request timeout.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::error::JiraApiError;
use crate::models::{
    AddCommentRequest, CreateIssueRequest, CreatedIssue, PostedComment, SearchResults,
};

/// Basic-auth credentials for a Jira Cloud account.
#[derive(Clone)]
pub struct JiraCredentials {
    email: String,
    api_token: String,
}

impl JiraCredentials {
    /// Create credentials from an account email and API token.
    pub fn new(email: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    /// Get the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Encode the credentials as an `Authorization` header value.
    ///
    /// Pure function over the stored email and token; no I/O. Produces
    /// `Basic {base64(email:token)}`.
    pub fn basic_auth_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.email, self.api_token));
        format!("Basic {}", encoded)
    }
}

impl std::fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("email", &self.email)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

/// Configuration for Jira REST client behavior.
#[derive(Debug, Clone)]
pub struct JiraClientConfig {
    /// Request timeout duration
    pub timeout: Duration,
}

impl Default for JiraClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl JiraClientConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Jira REST client authenticated with basic auth.
///
/// # Examples
///
/// ```no_run
/// # use jira_client::{JiraClient, JiraClientConfig, JiraCredentials};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = JiraCredentials::new("bot@example.com", "api-token");
/// let client = JiraClient::new(
///     "https://example.atlassian.net",
///     credentials,
///     JiraClientConfig::default(),
/// )?;
/// let results = client.search_issues("project = ENGLOG", 1).await?;
/// println!("{} matching issues", results.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct JiraClient {
    http_client: reqwest::Client,
    base_url: String,
    credentials: JiraCredentials,
    config: JiraClientConfig,
}

impl JiraClient {
    /// Create a new client for the given Jira base URL.
    ///
    /// A trailing slash on `base_url` is tolerated and stripped.
    ///
    /// # Errors
    ///
    /// Returns `JiraApiError::Configuration` if the HTTP client cannot be
    /// created.
    pub fn new(
        base_url: impl Into<String>,
        credentials: JiraCredentials,
        config: JiraClientConfig,
    ) -> Result<Self, JiraApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| JiraApiError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
            credentials,
            config,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &JiraClientConfig {
        &self.config
    }

    /// Get the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for issues matching a JQL expression.
    ///
    /// Only the summary field is requested for each matching issue; the
    /// bridge never needs more than the key and the summary it searched by.
    ///
    /// # Errors
    ///
    /// Returns `JiraApiError` if the request fails, the credentials are
    /// rejected, or the response cannot be parsed.
    pub async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
    ) -> Result<SearchResults, JiraApiError> {
        debug!(jql = %jql, "Searching issues");

        let url = format!("{}/rest/api/3/search", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("jql", jql), ("fields", "summary")])
            .query(&[("maxResults", max_results)])
            .header("Authorization", self.credentials.basic_auth_header())
            .send()
            .await
            .map_err(|e| JiraApiError::Transport {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(error_for_status(status.as_u16(), error_text, "search"));
        }

        response
            .json::<SearchResults>()
            .await
            .map_err(|e| JiraApiError::InvalidResponse {
                message: format!("Failed to parse search response: {}", e),
            })
    }

    /// Create an issue.
    ///
    /// # Errors
    ///
    /// Returns `JiraApiError` if the request fails, the credentials are
    /// rejected, the project or issue type does not exist, or the response
    /// cannot be parsed.
    pub async fn create_issue(
        &self,
        request: &CreateIssueRequest,
    ) -> Result<CreatedIssue, JiraApiError> {
        debug!(
            project = %request.fields.project.key,
            summary = %request.fields.summary,
            "Creating issue"
        );

        let url = format!("{}/rest/api/3/issue", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.credentials.basic_auth_header())
            .json(request)
            .send()
            .await
            .map_err(|e| JiraApiError::Transport {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(error_for_status(
                status.as_u16(),
                error_text,
                &format!("project {}", request.fields.project.key),
            ));
        }

        response
            .json::<CreatedIssue>()
            .await
            .map_err(|e| JiraApiError::InvalidResponse {
                message: format!("Failed to parse created issue: {}", e),
            })
    }

    /// Append a comment to an issue.
    ///
    /// Each call appends a new comment; there is no dedup at this layer.
    ///
    /// # Errors
    ///
    /// Returns `JiraApiError` if the request fails, the credentials are
    /// rejected, or the issue does not exist.
    pub async fn add_comment(
        &self,
        issue_key: &str,
        body: &str,
    ) -> Result<PostedComment, JiraApiError> {
        debug!(issue = %issue_key, "Adding comment");

        let url = format!("{}/rest/api/3/issue/{}/comment", self.base_url, issue_key);
        let request = AddCommentRequest {
            body: body.to_string(),
        };

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.credentials.basic_auth_header())
            .json(&request)
            .send()
            .await
            .map_err(|e| JiraApiError::Transport {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(error_for_status(
                status.as_u16(),
                error_text,
                &format!("issue {}", issue_key),
            ));
        }

        response
            .json::<PostedComment>()
            .await
            .map_err(|e| JiraApiError::InvalidResponse {
                message: format!("Failed to parse posted comment: {}", e),
            })
    }
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish()
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
fn error_for_status(status: u16, message: String, resource: &str) -> JiraApiError {
    match status {
        400 => JiraApiError::InvalidRequest { message },
        401 => JiraApiError::AuthenticationFailed,
        403 => JiraApiError::AuthorizationFailed,
        404 => JiraApiError::NotFound {
            resource: resource.to_string(),
        },
        status => JiraApiError::HttpError { status, message },
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
