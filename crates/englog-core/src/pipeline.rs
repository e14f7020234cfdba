//! Submission pipeline orchestration.
//!
//! Runs after the webhook ack, off the request path: parse the submitted
//! form, attribute the actor, resolve the ticket, append the audit comment,
//! then tell the actor how it went. Every failure short-circuits to exactly
//! one notification; notification failures themselves are logged and
//! swallowed.

use std::sync::Arc;

use slack_bot_sdk::ViewSubmission;
use tracing::{info, instrument, warn};

use crate::directory::ActorDirectory;
use crate::notifier::{Notifier, NotifyOutcome};
use crate::parser::parse_submission;
use crate::poster::CommentPoster;
use crate::resolver::TicketResolver;
use crate::{
    ActorId, DirectoryError, ErrorCategory, ParseError, PostError, ResolutionError, TicketKey,
    WorkLogEntry,
};

/// Error type for submission pipeline failures
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// The submitted form could not be read
    #[error("Submission parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// The actor's attribution could not be resolved
    #[error("Actor lookup failed: {0}")]
    Directory(#[from] DirectoryError),

    /// No ticket could be found or created
    #[error("Ticket resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    /// The ticket exists but the audit comment was rejected
    #[error("Audit comment failed: {0}")]
    Post(#[from] PostError),
}

impl PipelineError {
    /// Whether a retry of the same submission could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Parse(_) => false,
            Self::Directory(_) | Self::Resolution(_) | Self::Post(_) => true,
        }
    }

    /// Categorize for logging and alerting
    pub fn error_category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Permanent,
            Self::Directory(_) | Self::Resolution(_) | Self::Post(_) => ErrorCategory::Transient,
        }
    }
}

/// Orchestrates one submitted work-log form end to end.
pub struct WorkLogPipeline {
    directory: Arc<dyn ActorDirectory>,
    resolver: TicketResolver,
    poster: CommentPoster,
    notifier: Arc<dyn Notifier>,
}

impl WorkLogPipeline {
    /// Assemble the pipeline from its collaborators.
    pub fn new(
        directory: Arc<dyn ActorDirectory>,
        resolver: TicketResolver,
        poster: CommentPoster,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            directory,
            resolver,
            poster,
            notifier,
        }
    }

    /// Handle one modal submission: parse, attribute, resolve, comment,
    /// notify.
    ///
    /// Returns the ticket that received the audit comment. The actor is
    /// notified exactly once whatever the outcome.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure after notifying the actor. A
    /// `Post` failure means the resolved ticket stays cached and only the
    /// comment is missing.
    #[instrument(skip_all, fields(actor = %submission.user.id))]
    pub async fn handle_submission(
        &self,
        submission: &ViewSubmission,
    ) -> Result<TicketKey, PipelineError> {
        let actor_id = ActorId::new(submission.user.id.clone());

        let entry = match parse_submission(submission) {
            Ok(entry) => entry,
            Err(error) => {
                warn!(error = %error, "Rejected malformed submission");
                self.send(
                    &actor_id,
                    NotifyOutcome::InvalidSubmission {
                        error: error.clone(),
                    },
                )
                .await;
                return Err(error.into());
            }
        };

        let entry = match self.directory.lookup_email(&actor_id).await {
            Ok(email) => WorkLogEntry {
                actor: entry.actor.clone().with_email(email),
                ..entry
            },
            Err(error) => {
                warn!(error = %error, "Actor attribution lookup failed");
                self.send(&actor_id, NotifyOutcome::LogFailed).await;
                return Err(error.into());
            }
        };

        let ticket = match self.resolver.resolve(&entry.actor, entry.category).await {
            Ok(ticket) => ticket,
            Err(error) => {
                warn!(error = %error, "Ticket resolution failed");
                self.send(&actor_id, NotifyOutcome::LogFailed).await;
                return Err(error.into());
            }
        };

        if let Err(error) = self.poster.post(&ticket, &entry).await {
            warn!(ticket = %ticket, error = %error, "Audit comment failed");
            self.send(
                &actor_id,
                NotifyOutcome::CommentFailed {
                    ticket: ticket.clone(),
                },
            )
            .await;
            return Err(error.into());
        }

        info!(
            ticket = %ticket,
            category = %entry.category,
            "Work log recorded"
        );
        self.send(
            &actor_id,
            NotifyOutcome::Logged {
                ticket: ticket.clone(),
            },
        )
        .await;
        Ok(ticket)
    }

    /// Best-effort outcome delivery; failures are logged, never surfaced.
    async fn send(&self, actor: &ActorId, outcome: NotifyOutcome) {
        if let Err(error) = self.notifier.notify(actor, &outcome).await {
            warn!(actor = %actor, error = %error, "Failed to notify actor");
        }
    }
}

impl std::fmt::Debug for WorkLogPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkLogPipeline")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
