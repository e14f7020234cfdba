//! Request and response types for the Jira REST API.
//!
//! Only the fields the bridge actually reads or writes are modeled; Jira
//! returns far more, and serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Request body for `POST /rest/api/3/issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    /// Field block of the new issue
    pub fields: IssueFields,
}

impl CreateIssueRequest {
    /// Build a create request for a plain Task-style issue.
    pub fn new(
        project_key: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            fields: IssueFields {
                project: ProjectRef {
                    key: project_key.into(),
                },
                summary: summary.into(),
                description: description.into(),
                issuetype: IssueTypeRef {
                    name: issue_type.into(),
                },
            },
        }
    }
}

/// Writable fields of a new issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    /// Project the issue is created in
    pub project: ProjectRef,

    /// Issue summary line
    pub summary: String,

    /// Issue description body
    pub description: String,

    /// Issue type, referenced by name
    pub issuetype: IssueTypeRef,
}

/// Project reference by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project key, e.g. `"ENGLOG"`
    pub key: String,
}

/// Issue type reference by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeRef {
    /// Type name, e.g. `"Task"`
    pub name: String,
}

/// Response body of a successful issue creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Numeric issue id, serialized as a string by Jira
    pub id: String,

    /// Project-scoped issue key, e.g. `"ENGLOG-55"`
    pub key: String,

    /// Canonical REST URL of the new issue
    #[serde(rename = "self")]
    pub self_url: String,
}

/// One page of JQL search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Offset of this page within the full result set
    pub start_at: u32,

    /// Page size the server applied
    pub max_results: u32,

    /// Total number of matching issues
    pub total: u32,

    /// Issues on this page
    pub issues: Vec<FoundIssue>,
}

/// Issue row within search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundIssue {
    /// Numeric issue id, serialized as a string by Jira
    pub id: String,

    /// Project-scoped issue key
    pub key: String,

    /// Requested fields of the issue
    pub fields: FoundIssueFields,
}

/// Fields requested for search result rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundIssueFields {
    /// Issue summary line
    pub summary: String,
}

/// Request body for `POST /rest/api/3/issue/{key}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    /// Comment text
    pub body: String,
}

/// Response body of a successful comment append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedComment {
    /// Numeric comment id, serialized as a string by Jira
    pub id: String,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
