//! Actor attribution lookups.
//!
//! Summary templates attribute work by email where the platform knows one.
//! The pipeline fetches the email lazily per submission rather than caching
//! it; workspace profiles change and the tracker search must follow.

use async_trait::async_trait;

use crate::{ActorId, DirectoryError};

/// Resolves platform actor ids to attribution emails.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Look up the email address for an actor.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::LookupFailed` when the platform cannot
    /// produce one, including profiles with the email field withheld.
    async fn lookup_email(&self, actor: &ActorId) -> Result<String, DirectoryError>;
}
