//! # Jira Ticket Tracker Adapter
//!
//! Binds the `TicketTracker` trait to the Jira REST v3 client. Every failure
//! of the underlying client collapses into the tracker-unavailable errors
//! the resolver and poster expect.

use async_trait::async_trait;
use jira_client::{CreateIssueRequest, JiraApiError, JiraClient};
use tracing::debug;

use crate::tracker::TicketTracker;
use crate::{PostError, ResolutionError, TicketKey};

/// Issue type for every work-log ticket.
const ISSUE_TYPE: &str = "Task";

/// Page size for summary searches. The `~` operator returns fuzzy hits, so
/// a handful are fetched and verified verbatim.
const SEARCH_PAGE_SIZE: u32 = 5;

/// Render the JQL that finds tickets by exact summary within a project.
///
/// The summary is wrapped in escaped quotes for an exact-phrase match and
/// ordered newest first. Quotes and backslashes inside the summary are
/// escaped so the phrase survives JQL string syntax.
pub fn summary_search_jql(project_key: &str, summary: &str) -> String {
    format!(
        "project = \"{}\" AND summary ~ \"\\\"{}\\\"\" ORDER BY created DESC",
        escape_jql(project_key),
        escape_jql(summary)
    )
}

fn escape_jql(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Jira-backed ticket tracker scoped to one project.
///
/// # Examples
///
/// ```no_run
/// use englog_core::adapters::JiraTicketTracker;
/// use jira_client::{JiraClient, JiraClientConfig, JiraCredentials};
/// # fn example() -> Result<(), jira_client::JiraApiError> {
/// let client = JiraClient::new(
///     "https://example.atlassian.net",
///     JiraCredentials::new("bot@example.com", "api-token"),
///     JiraClientConfig::default(),
/// )?;
/// let tracker = JiraTicketTracker::new(client, "ENGLOG");
/// # let _ = tracker;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JiraTicketTracker {
    client: JiraClient,
    project_key: String,
}

impl JiraTicketTracker {
    /// Create a tracker over a client and a project key.
    pub fn new(client: JiraClient, project_key: impl Into<String>) -> Self {
        Self {
            client,
            project_key: project_key.into(),
        }
    }

    fn unavailable(operation: &str, error: JiraApiError) -> ResolutionError {
        ResolutionError::TrackerUnavailable {
            message: format!("{}: {}", operation, error),
        }
    }
}

#[async_trait]
impl TicketTracker for JiraTicketTracker {
    async fn find_ticket(&self, summary: &str) -> Result<Option<TicketKey>, ResolutionError> {
        let jql = summary_search_jql(&self.project_key, summary);
        let results = self
            .client
            .search_issues(&jql, SEARCH_PAGE_SIZE)
            .await
            .map_err(|e| Self::unavailable("search", e))?;

        // The phrase match can still return near misses; accept only a
        // verbatim summary.
        let found = results
            .issues
            .into_iter()
            .find(|issue| issue.fields.summary == summary);

        if let Some(issue) = &found {
            debug!(key = %issue.key, "Matched existing ticket by summary");
        }
        Ok(found.map(|issue| TicketKey::new(issue.key)))
    }

    async fn create_ticket(
        &self,
        summary: &str,
        description: &str,
    ) -> Result<TicketKey, ResolutionError> {
        let request = CreateIssueRequest::new(&self.project_key, summary, description, ISSUE_TYPE);
        let created = self
            .client
            .create_issue(&request)
            .await
            .map_err(|e| Self::unavailable("create", e))?;
        Ok(TicketKey::new(created.key))
    }

    async fn add_comment(&self, ticket: &TicketKey, body: &str) -> Result<(), PostError> {
        self.client
            .add_comment(ticket.as_str(), body)
            .await
            .map_err(|e| PostError::TrackerUnavailable {
                message: format!("comment: {}", e),
            })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "jira_tests.rs"]
mod tests;
