//! Work-log form submission parsing.
//!
//! Walks the modal's `view.state.values` structure by the block and action
//! identifiers the modal declares, never by position, and produces a
//! normalized [`WorkLogEntry`]. Pure: no network, no side effects.

use serde_json::Value;
use slack_bot_sdk::views::{
    CATEGORY_BLOCK_ID, DESCRIPTION_BLOCK_ID, DURATION_BLOCK_ID, VALUE_ACTION_ID,
};
use slack_bot_sdk::ViewSubmission;

use crate::{Actor, ActorId, ParseError, WorkCategory, WorkLogEntry};

/// Parse a modal submission into a normalized work-log entry.
///
/// The actor carries no email yet; attribution is resolved later in the
/// pipeline.
///
/// # Errors
///
/// - [`ParseError::MissingField`] when a required block, input, or value is
///   absent from the view state.
/// - [`ParseError::InvalidOption`] when the category selector carries a value
///   outside the enumerated set.
/// - [`ParseError::Empty`] when a required text field is blank.
pub fn parse_submission(submission: &ViewSubmission) -> Result<WorkLogEntry, ParseError> {
    let values = &submission.view.state.values;

    let category_label = select_value(values, CATEGORY_BLOCK_ID)?;
    let category =
        WorkCategory::from_label(category_label).ok_or_else(|| ParseError::InvalidOption {
            value: category_label.to_string(),
        })?;

    let duration = text_value(values, DURATION_BLOCK_ID)?;
    let description = text_value(values, DESCRIPTION_BLOCK_ID)?;

    Ok(WorkLogEntry {
        actor: Actor::new(ActorId::new(submission.user.id.clone())),
        category,
        duration: duration.to_string(),
        description: description.to_string(),
    })
}

/// Read the selected option of a static-select block.
fn select_value<'a>(values: &'a Value, block_id: &str) -> Result<&'a str, ParseError> {
    values
        .get(block_id)
        .and_then(|block| block.get(VALUE_ACTION_ID))
        .and_then(|input| input.get("selected_option"))
        .and_then(|option| option.get("value"))
        .and_then(|value| value.as_str())
        .ok_or_else(|| ParseError::MissingField {
            field: block_id.to_string(),
        })
}

/// Read the text of a plain-text-input block, rejecting blank values.
fn text_value<'a>(values: &'a Value, block_id: &str) -> Result<&'a str, ParseError> {
    let value = values
        .get(block_id)
        .and_then(|block| block.get(VALUE_ACTION_ID))
        .and_then(|input| input.get("value"))
        .and_then(|value| value.as_str())
        .ok_or_else(|| ParseError::MissingField {
            field: block_id.to_string(),
        })?;

    if value.trim().is_empty() {
        return Err(ParseError::Empty {
            field: block_id.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
