use super::*;
use slack_bot_sdk::payloads::{SlackUser, SubmittedView, ViewState};

/// Build a submission around the given state values.
fn submission_with(values: serde_json::Value) -> ViewSubmission {
    ViewSubmission {
        kind: "view_submission".to_string(),
        user: SlackUser {
            id: "U12345678".to_string(),
            username: Some("engineer".to_string()),
        },
        view: SubmittedView {
            callback_id: "log_modal".to_string(),
            state: ViewState { values },
        },
    }
}

fn complete_values() -> serde_json::Value {
    serde_json::json!({
        "category": {"input": {"selected_option": {"value": "Documentation"}}},
        "duration": {"input": {"value": "45m"}},
        "description": {"input": {"value": "Updated runbook"}},
    })
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[test]
fn test_complete_submission_parses() {
    // Arrange
    let submission = submission_with(complete_values());

    // Act
    let entry = parse_submission(&submission).unwrap();

    // Assert
    assert_eq!(entry.actor.id.as_str(), "U12345678");
    assert_eq!(entry.actor.email, None);
    assert_eq!(entry.category, WorkCategory::Documentation);
    assert_eq!(entry.duration, "45m");
    assert_eq!(entry.description, "Updated runbook");
}

#[test]
fn test_multiline_description_is_preserved() {
    let mut values = complete_values();
    values["description"]["input"]["value"] =
        serde_json::json!("Updated runbook.\nAdded rollback steps.");

    let entry = parse_submission(&submission_with(values)).unwrap();

    assert_eq!(entry.description, "Updated runbook.\nAdded rollback steps.");
}

#[test]
fn test_unknown_blocks_are_ignored() {
    let mut values = complete_values();
    values["unrelated_block"] = serde_json::json!({"input": {"value": "noise"}});

    let entry = parse_submission(&submission_with(values)).unwrap();

    assert_eq!(entry.category, WorkCategory::Documentation);
}

// ============================================================================
// Missing Field Tests
// ============================================================================

#[test]
fn test_missing_description_block() {
    let mut values = complete_values();
    values.as_object_mut().unwrap().remove("description");

    let error = parse_submission(&submission_with(values)).unwrap_err();

    assert_eq!(
        error,
        ParseError::MissingField {
            field: "description".to_string()
        }
    );
}

#[test]
fn test_missing_category_selection() {
    let mut values = complete_values();
    values["category"] = serde_json::json!({"input": {"type": "static_select"}});

    let error = parse_submission(&submission_with(values)).unwrap_err();

    assert_eq!(
        error,
        ParseError::MissingField {
            field: "category".to_string()
        }
    );
}

#[test]
fn test_null_duration_value_is_missing() {
    let mut values = complete_values();
    values["duration"]["input"]["value"] = serde_json::Value::Null;

    let error = parse_submission(&submission_with(values)).unwrap_err();

    assert_eq!(
        error,
        ParseError::MissingField {
            field: "duration".to_string()
        }
    );
}

#[test]
fn test_empty_state_reports_category_first() {
    let error = parse_submission(&submission_with(serde_json::json!({}))).unwrap_err();

    assert_eq!(
        error,
        ParseError::MissingField {
            field: "category".to_string()
        }
    );
}

// ============================================================================
// Invalid and Empty Value Tests
// ============================================================================

#[test]
fn test_unrecognized_category_option() {
    let mut values = complete_values();
    values["category"]["input"]["selected_option"]["value"] = serde_json::json!("Gardening");

    let error = parse_submission(&submission_with(values)).unwrap_err();

    assert_eq!(
        error,
        ParseError::InvalidOption {
            value: "Gardening".to_string()
        }
    );
}

#[test]
fn test_blank_duration_is_empty() {
    let mut values = complete_values();
    values["duration"]["input"]["value"] = serde_json::json!("   ");

    let error = parse_submission(&submission_with(values)).unwrap_err();

    assert_eq!(
        error,
        ParseError::Empty {
            field: "duration".to_string()
        }
    );
}

#[test]
fn test_blank_description_is_empty() {
    let mut values = complete_values();
    values["description"]["input"]["value"] = serde_json::json!("");

    let error = parse_submission(&submission_with(values)).unwrap_err();

    assert_eq!(
        error,
        ParseError::Empty {
            field: "description".to_string()
        }
    );
}
