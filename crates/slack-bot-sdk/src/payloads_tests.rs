//! Tests for inbound Slack payload models.

use super::*;

// ============================================================================
// Test: Form Decoding
// ============================================================================

#[test]
fn test_form_fields_decodes_url_encoding() {
    // Arrange: a realistic slash-command body
    let body = b"token=abc&command=%2Flogoffqueuework&trigger_id=123.456.789&user_id=U0001&text=";

    // Act
    let fields = form_fields(body);

    // Assert
    assert_eq!(
        fields.get("command").map(String::as_str),
        Some("/logoffqueuework")
    );
    assert_eq!(
        fields.get("trigger_id").map(String::as_str),
        Some("123.456.789")
    );
    assert_eq!(fields.get("user_id").map(String::as_str), Some("U0001"));
    assert_eq!(fields.get("text").map(String::as_str), Some(""));
}

#[test]
fn test_form_fields_empty_body() {
    let fields = form_fields(b"");

    assert!(fields.is_empty());
}

// ============================================================================
// Test: Slash Command Extraction
// ============================================================================

#[test]
fn test_slash_command_from_form() {
    // Arrange
    let fields = form_fields(b"command=%2Flogoffqueuework&trigger_id=13345224609.738474920.8088930838d88f008e0&user_id=U2147483697");

    // Act
    let command = SlashCommand::from_form(&fields).expect("all required fields present");

    // Assert
    assert_eq!(command.command, "/logoffqueuework");
    assert_eq!(command.trigger_id, "13345224609.738474920.8088930838d88f008e0");
    assert_eq!(command.user_id, "U2147483697");
}

#[test]
fn test_slash_command_missing_trigger_id() {
    let fields = form_fields(b"command=%2Flogoffqueuework&user_id=U123");

    assert!(SlashCommand::from_form(&fields).is_none());
}

#[test]
fn test_slash_command_empty_field_treated_as_absent() {
    let fields = form_fields(b"command=%2Flogoffqueuework&trigger_id=&user_id=U123");

    assert!(SlashCommand::from_form(&fields).is_none());
}

// ============================================================================
// Test: View Submission Envelope
// ============================================================================

fn submission_json() -> serde_json::Value {
    serde_json::json!({
        "type": "view_submission",
        "team": {"id": "T0001", "domain": "example"},
        "user": {"id": "U123", "username": "jdoe", "name": "jdoe"},
        "view": {
            "id": "V0001",
            "callback_id": "log_modal",
            "state": {
                "values": {
                    "category": {
                        "input": {
                            "type": "static_select",
                            "selected_option": {"value": "Interviewing"}
                        }
                    },
                    "duration": {
                        "input": {"type": "plain_text_input", "value": "30m"}
                    },
                    "description": {
                        "input": {"type": "plain_text_input", "value": "Panel interview"}
                    }
                }
            }
        }
    })
}

#[test]
fn test_view_submission_deserializes_envelope() {
    // Act
    let submission: ViewSubmission =
        serde_json::from_value(submission_json()).expect("envelope should deserialize");

    // Assert
    assert_eq!(submission.kind, VIEW_SUBMISSION_TYPE);
    assert_eq!(submission.user.id, "U123");
    assert_eq!(submission.user.username.as_deref(), Some("jdoe"));
    assert_eq!(submission.view.callback_id, "log_modal");
}

#[test]
fn test_view_submission_keeps_values_untyped() {
    let submission: ViewSubmission =
        serde_json::from_value(submission_json()).expect("envelope should deserialize");

    // The heterogeneous interior stays raw for the parser to walk
    let selected = submission.view.state.values["category"]["input"]["selected_option"]["value"]
        .as_str()
        .expect("selected option value present");
    assert_eq!(selected, "Interviewing");
}

#[test]
fn test_view_submission_tolerates_missing_callback_id() {
    let mut envelope = submission_json();
    envelope["view"]
        .as_object_mut()
        .expect("view is an object")
        .remove("callback_id");

    let submission: ViewSubmission =
        serde_json::from_value(envelope).expect("envelope should deserialize");

    assert_eq!(submission.view.callback_id, "");
}

#[test]
fn test_view_submission_requires_user() {
    let mut envelope = submission_json();
    envelope
        .as_object_mut()
        .expect("envelope is an object")
        .remove("user");

    let result: Result<ViewSubmission, _> = serde_json::from_value(envelope);

    assert!(result.is_err(), "an envelope without a user is malformed");
}
