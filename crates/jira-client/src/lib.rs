//! # Jira Client
//!
//! Jira Cloud REST client for the Englog bridge: JQL search, issue creation,
//! and comment appends over basic auth (account email + API token), with a
//! typed status-to-error mapping and bounded request timeouts.
//!
//! Only the three endpoints the bridge uses are modeled:
//!
//! - `GET /rest/api/3/search` — find a ticket by its deterministic summary.
//! - `POST /rest/api/3/issue` — create a ticket.
//! - `POST /rest/api/3/issue/{key}/comment` — append an audit comment.
//!
//! ## Usage
//!
//! ```no_run
//! use jira_client::{JiraClient, JiraClientConfig, JiraCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = JiraClient::new(
//!     "https://example.atlassian.net",
//!     JiraCredentials::new("bot@example.com", "api-token"),
//!     JiraClientConfig::default(),
//! )?;
//! let results = client.search_issues("project = \"ENGLOG\"", 1).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::{JiraClient, JiraClientConfig, JiraCredentials};
pub use error::JiraApiError;
pub use models::{
    AddCommentRequest, CreateIssueRequest, CreatedIssue, FoundIssue, FoundIssueFields, IssueFields,
    IssueTypeRef, PostedComment, ProjectRef, SearchResults,
};
