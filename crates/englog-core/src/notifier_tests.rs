use super::*;

/// Success messages always name the ticket.
#[test]
fn test_logged_message_names_the_ticket() {
    let outcome = NotifyOutcome::Logged {
        ticket: TicketKey::new("ENGLOG-55"),
    };

    assert_eq!(outcome.message(), "✅ Off-queue work logged to `ENGLOG-55`.");
}

/// Parse rejections name the offending field so the actor can fix the form.
#[test]
fn test_invalid_submission_message_names_the_field() {
    let outcome = NotifyOutcome::InvalidSubmission {
        error: ParseError::MissingField {
            field: "description".to_string(),
        },
    };

    assert_eq!(
        outcome.message(),
        "❌ Required field 'description' is missing from the submission. Nothing was logged."
    );
}

/// Rejected category values are echoed back.
#[test]
fn test_invalid_option_message_echoes_the_value() {
    let outcome = NotifyOutcome::InvalidSubmission {
        error: ParseError::InvalidOption {
            value: "Gardening".to_string(),
        },
    };

    assert_eq!(
        outcome.message(),
        "❌ 'Gardening' is not a recognized work category. Nothing was logged."
    );
}

/// Resolution failures get a generic retry message; no ticket exists yet.
#[test]
fn test_log_failed_message_is_generic() {
    assert_eq!(
        NotifyOutcome::LogFailed.message(),
        "❌ Failed to record off-queue work. Please try again later."
    );
}

/// Comment failures tell the actor the ticket exists but the entry is lost.
#[test]
fn test_comment_failed_message_names_the_surviving_ticket() {
    let outcome = NotifyOutcome::CommentFailed {
        ticket: TicketKey::new("ENGLOG-55"),
    };

    let message = outcome.message();
    assert!(message.contains("`ENGLOG-55`"));
    assert!(message.contains("could not be recorded"));
}
