//! Audit comment formatting and posting.
//!
//! Every submission appends one comment to its resolved ticket. The body is
//! a fixed marker-style template so the ticket reads as a uniform work log.
//! Posting is append-only and not idempotent; the pipeline calls it exactly
//! once per submission.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::tracker::TicketTracker;
use crate::{PostError, TicketKey, WorkLogEntry};

/// Render the audit comment body for a work-log entry.
///
/// One `*Marker:* value` line per field, with the timestamp in RFC 3339
/// UTC down to whole seconds.
pub fn format_audit_comment(entry: &WorkLogEntry, logged_at: DateTime<Utc>) -> String {
    format!(
        "*Engineer:* {}\n*Category:* {}\n*Duration:* {}\n*Description:* {}\n*Logged:* {}",
        entry.actor.attribution(),
        entry.category,
        entry.duration,
        entry.description,
        logged_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// Appends formatted audit comments to resolved tickets.
pub struct CommentPoster {
    tracker: Arc<dyn TicketTracker>,
}

impl CommentPoster {
    /// Create a poster over a tracker.
    pub fn new(tracker: Arc<dyn TicketTracker>) -> Self {
        Self { tracker }
    }

    /// Append the audit comment for an entry, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `PostError::TrackerUnavailable` when the tracker rejects the
    /// comment. The ticket resolution that preceded this call stays cached.
    pub async fn post(&self, ticket: &TicketKey, entry: &WorkLogEntry) -> Result<(), PostError> {
        self.post_at(Utc::now(), ticket, entry).await
    }

    /// Append the audit comment with an explicit timestamp.
    pub async fn post_at(
        &self,
        logged_at: DateTime<Utc>,
        ticket: &TicketKey,
        entry: &WorkLogEntry,
    ) -> Result<(), PostError> {
        let body = format_audit_comment(entry, logged_at);
        self.tracker.add_comment(ticket, &body).await?;
        debug!(
            ticket = %ticket,
            category = %entry.category,
            "Posted audit comment"
        );
        Ok(())
    }
}

impl std::fmt::Debug for CommentPoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentPoster").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "poster_tests.rs"]
mod tests;
