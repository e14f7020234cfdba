//! Ticket tracker trait.

use async_trait::async_trait;

use crate::{PostError, ResolutionError, TicketKey};

/// Issue-tracker operations the resolver and poster depend on.
///
/// Search and create belong to resolution and surface [`ResolutionError`];
/// the comment append belongs to audit posting and surfaces [`PostError`].
/// Implementations own the mapping from their transport errors onto those
/// two, so the core never sees HTTP statuses.
#[async_trait]
pub trait TicketTracker: Send + Sync {
    /// Find an existing ticket whose summary matches exactly.
    ///
    /// Returns the newest match when several exist, `None` when none do.
    async fn find_ticket(&self, summary: &str) -> Result<Option<TicketKey>, ResolutionError>;

    /// Create a ticket, returning the key the tracker assigned.
    async fn create_ticket(
        &self,
        summary: &str,
        description: &str,
    ) -> Result<TicketKey, ResolutionError>;

    /// Append a comment to a ticket. Every call appends; deduplication is
    /// the caller's concern.
    async fn add_comment(&self, ticket: &TicketKey, body: &str) -> Result<(), PostError>;
}
