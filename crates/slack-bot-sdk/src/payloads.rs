//! Inbound Slack payload models.
//!
//! Slack multiplexes several request shapes onto webhook endpoints, all as
//! `application/x-www-form-urlencoded` bodies: slash commands arrive as flat
//! form fields, interactivity callbacks (modal submissions) arrive as a
//! single `payload` form field holding a JSON envelope. This module parses
//! both shapes into typed models; deciding which shape a request is belongs
//! to the caller.

use serde::Deserialize;
use std::collections::HashMap;

/// Envelope `type` value Slack uses for modal submissions.
pub const VIEW_SUBMISSION_TYPE: &str = "view_submission";

/// Form field holding the JSON envelope of an interactivity callback.
pub const PAYLOAD_FIELD: &str = "payload";

/// Decode a form-urlencoded body into its fields.
///
/// Duplicate keys keep the last value, which matches how Slack encodes its
/// payloads (each field appears once).
pub fn form_fields(body: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

/// A slash-command invocation.
///
/// Slack sends more fields than these (team, channel, response URL); only
/// the ones the bridge acts on are modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    /// The command as typed, including the leading slash.
    pub command: String,
    /// Short-lived handle for opening a modal in response.
    pub trigger_id: String,
    /// Slack user ID of the invoker.
    pub user_id: String,
}

impl SlashCommand {
    /// Build a command from decoded form fields.
    ///
    /// Returns `None` when any required field is absent or empty; callers
    /// treat such requests as unrecognized rather than erroring.
    pub fn from_form(fields: &HashMap<String, String>) -> Option<Self> {
        let command = non_empty(fields.get("command"))?;
        let trigger_id = non_empty(fields.get("trigger_id"))?;
        let user_id = non_empty(fields.get("user_id"))?;

        Some(Self {
            command,
            trigger_id,
            user_id,
        })
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// A modal submission envelope (`type: "view_submission"`).
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSubmission {
    /// Envelope type; [`VIEW_SUBMISSION_TYPE`] for submissions.
    #[serde(rename = "type")]
    pub kind: String,
    /// The submitting user.
    pub user: SlackUser,
    /// The submitted view, including its input state.
    pub view: SubmittedView,
}

/// The user attached to an interactivity envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// The view portion of a submission envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedView {
    /// Identifier the modal was opened with; distinguishes modals when an
    /// app serves more than one.
    #[serde(default)]
    pub callback_id: String,
    pub state: ViewState,
}

/// Submitted input state.
///
/// `values` is the raw block-id → action-id → value mapping. Its interior
/// shape varies per element type (`{"value": …}` for text inputs,
/// `{"selected_option": {"value": …}}` for selects), so it stays untyped
/// here; normalizing it is the submission parser's job.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewState {
    pub values: serde_json::Value,
}

#[cfg(test)]
#[path = "payloads_tests.rs"]
mod tests;
