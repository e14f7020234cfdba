//! Inbound event classification.
//!
//! The chat platform multiplexes two logical events over one webhook
//! endpoint, both form-encoded: a slash command (plain form fields) and a
//! modal submission (a JSON envelope inside a `payload` field). Raw bodies
//! become the closed [`IncomingEvent`] union exactly once, at the dispatcher
//! boundary; downstream components never see raw JSON.

use slack_bot_sdk::payloads::{form_fields, PAYLOAD_FIELD, VIEW_SUBMISSION_TYPE};
use slack_bot_sdk::views::LOG_MODAL_CALLBACK_ID;
use slack_bot_sdk::{SlashCommand, ViewSubmission};

/// One classified inbound webhook event.
///
/// Immutable once classified; lives for the duration of one request.
#[derive(Debug, Clone)]
pub enum IncomingEvent {
    /// Slash command invoked; the actor wants the work-log form opened.
    FormRequest(SlashCommand),

    /// The work-log modal was submitted.
    FormSubmission(Box<ViewSubmission>),

    /// Anything else the platform sends; acknowledged as a no-op.
    Unknown,
}

impl IncomingEvent {
    /// Classify a raw webhook body.
    ///
    /// Never fails: anything that is not a recognizable slash command or a
    /// submission of the work-log modal classifies as [`Self::Unknown`], and
    /// the dispatcher acknowledges it without further work. Other view
    /// submissions (foreign `callback_id`) are deliberately `Unknown` too.
    pub fn classify(body: &[u8]) -> Self {
        let fields = form_fields(body);

        if let Some(payload) = fields.get(PAYLOAD_FIELD) {
            if let Ok(submission) = serde_json::from_str::<ViewSubmission>(payload) {
                if submission.kind == VIEW_SUBMISSION_TYPE
                    && submission.view.callback_id == LOG_MODAL_CALLBACK_ID
                {
                    return Self::FormSubmission(Box::new(submission));
                }
            }
            return Self::Unknown;
        }

        if let Some(command) = SlashCommand::from_form(&fields) {
            return Self::FormRequest(command);
        }

        Self::Unknown
    }

    /// Get the event kind as a static label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FormRequest(_) => "form_request",
            Self::FormSubmission(_) => "form_submission",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
