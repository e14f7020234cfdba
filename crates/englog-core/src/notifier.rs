//! Actor notification after the webhook ack.
//!
//! The dispatcher acknowledges within the platform deadline and the pipeline
//! finishes in the background, so the only way to tell the actor how their
//! submission fared is a follow-up message. Delivery is best effort: a failed
//! notification is logged and dropped, never retried.

use async_trait::async_trait;

use crate::{ActorId, NotifyError, ParseError, TicketKey};

/// Outcome of one submission, as reported back to the actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The entry was resolved to a ticket and the audit comment landed.
    Logged {
        /// Ticket that received the audit comment
        ticket: TicketKey,
    },

    /// The form payload was rejected before any tracker traffic.
    InvalidSubmission {
        /// What was wrong with the submitted form
        error: ParseError,
    },

    /// Resolution failed; nothing was created, cached, or written.
    LogFailed,

    /// The ticket was resolved (and stays cached) but the comment was
    /// rejected, so this entry is missing from the log.
    CommentFailed {
        /// Ticket that is missing the audit comment
        ticket: TicketKey,
    },
}

impl NotifyOutcome {
    /// Message text delivered to the actor for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Logged { ticket } => {
                format!("✅ Off-queue work logged to `{}`.", ticket)
            }
            Self::InvalidSubmission { error } => {
                format!("❌ {}. Nothing was logged.", error)
            }
            Self::LogFailed => {
                "❌ Failed to record off-queue work. Please try again later.".to_string()
            }
            Self::CommentFailed { ticket } => {
                format!(
                    "⚠️ Your work-log ticket `{}` exists, but this entry could not be recorded. Please try again later.",
                    ticket
                )
            }
        }
    }
}

/// Delivers submission outcomes back to the originating actor.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the outcome message to the actor.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DeliveryFailed` when the platform refuses the
    /// message. Callers log the failure and move on.
    async fn notify(&self, actor: &ActorId, outcome: &NotifyOutcome) -> Result<(), NotifyError>;
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
