//! Modal view definitions.
//!
//! The work-log modal is the only view this app opens. Its block and action
//! identifiers are shared constants so the submission side can walk
//! `view.state.values` by the same ids the modal declares, never by
//! position.

use serde_json::{json, Value};

/// Callback id the work-log modal is opened with.
pub const LOG_MODAL_CALLBACK_ID: &str = "log_modal";

/// Block id of the category selector.
pub const CATEGORY_BLOCK_ID: &str = "category";

/// Block id of the duration text input.
pub const DURATION_BLOCK_ID: &str = "duration";

/// Block id of the description text input.
pub const DESCRIPTION_BLOCK_ID: &str = "description";

/// Action id shared by every input element in the modal.
pub const VALUE_ACTION_ID: &str = "input";

/// Build the work-log modal view for `views.open`.
///
/// `categories` become the options of the category selector, value equal to
/// label, in the given order.
pub fn work_log_modal<'a>(categories: impl IntoIterator<Item = &'a str>) -> Value {
    let options: Vec<Value> = categories
        .into_iter()
        .map(|category| {
            json!({
                "text": {"type": "plain_text", "text": category},
                "value": category,
            })
        })
        .collect();

    json!({
        "type": "modal",
        "callback_id": LOG_MODAL_CALLBACK_ID,
        "title": {"type": "plain_text", "text": "Log Off-Queue Work"},
        "submit": {"type": "plain_text", "text": "Submit"},
        "blocks": [
            {
                "type": "input",
                "block_id": CATEGORY_BLOCK_ID,
                "label": {"type": "plain_text", "text": "Work Category"},
                "element": {
                    "type": "static_select",
                    "action_id": VALUE_ACTION_ID,
                    "placeholder": {"type": "plain_text", "text": "Select category"},
                    "options": options,
                },
            },
            {
                "type": "input",
                "block_id": DURATION_BLOCK_ID,
                "label": {"type": "plain_text", "text": "Duration (e.g. 1h, 30m)"},
                "element": {"type": "plain_text_input", "action_id": VALUE_ACTION_ID},
            },
            {
                "type": "input",
                "block_id": DESCRIPTION_BLOCK_ID,
                "label": {"type": "plain_text", "text": "Work Description"},
                "element": {
                    "type": "plain_text_input",
                    "action_id": VALUE_ACTION_ID,
                    "multiline": true,
                },
            },
        ],
    })
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
