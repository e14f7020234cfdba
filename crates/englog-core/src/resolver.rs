//! Idempotent ticket resolution.
//!
//! The resolver maps a `(actor, category, period)` bucket to exactly one
//! tracker ticket: cache hit, then tracker search by the deterministic
//! summary, then create. Concurrent submissions for the same bucket are
//! serialized through a per-key async mutex, so at most one ticket is ever
//! created per bucket; unrelated buckets stay concurrent.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheKey, ResolutionCache};
use crate::tracker::TicketTracker;
use crate::{Actor, PeriodPolicy, ResolutionError, TicketKey, WorkCategory};

/// Resolves work-log buckets to tracker tickets, creating them on demand.
pub struct TicketResolver {
    tracker: Arc<dyn TicketTracker>,
    cache: Arc<dyn ResolutionCache>,
    policy: PeriodPolicy,
    locks: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl TicketResolver {
    /// Create a resolver over a tracker and a cache store.
    pub fn new(
        tracker: Arc<dyn TicketTracker>,
        cache: Arc<dyn ResolutionCache>,
        policy: PeriodPolicy,
    ) -> Self {
        Self {
            tracker,
            cache,
            policy,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the bucketing policy.
    pub fn policy(&self) -> PeriodPolicy {
        self.policy
    }

    /// Resolve the ticket for an actor and category at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::TrackerUnavailable`] when the tracker
    /// search or create fails. Failed resolutions are never cached.
    pub async fn resolve(
        &self,
        actor: &Actor,
        category: WorkCategory,
    ) -> Result<TicketKey, ResolutionError> {
        self.resolve_at(Utc::now(), actor, category).await
    }

    /// Resolve at an explicit point in time.
    ///
    /// The timestamp decides the period bucket under monthly bucketing;
    /// callers other than tests use [`Self::resolve`].
    pub async fn resolve_at(
        &self,
        now: DateTime<Utc>,
        actor: &Actor,
        category: WorkCategory,
    ) -> Result<TicketKey, ResolutionError> {
        let key = CacheKey::new(actor.id.clone(), category, self.policy.period_label(now));

        // Fast path, no lock contention on repeat submissions.
        if let Some(entry) = self.cache.get(&key).await {
            debug!(bucket = %key, ticket = %entry.ticket_key, "Resolved from cache");
            return Ok(entry.ticket_key);
        }

        let key_lock = self.lock_for(&key).await;
        let _guard = key_lock.lock().await;

        // Second look under the lock; a concurrent resolution for this
        // bucket may have completed while we waited.
        if let Some(entry) = self.cache.get(&key).await {
            debug!(bucket = %key, ticket = %entry.ticket_key, "Resolved from cache after wait");
            return Ok(entry.ticket_key);
        }

        let summary = self.policy.ticket_summary(category, actor.attribution(), now);

        if let Some(ticket) = self.tracker.find_ticket(&summary).await? {
            info!(bucket = %key, ticket = %ticket, "Adopted existing ticket");
            self.cache.put(key, ticket.clone()).await;
            return Ok(ticket);
        }

        let description = self
            .policy
            .ticket_description(category, actor.attribution(), now);
        let ticket = self.tracker.create_ticket(&summary, &description).await?;

        info!(bucket = %key, ticket = %ticket, "Created ticket");
        self.cache.put(key, ticket.clone()).await;
        Ok(ticket)
    }

    /// Get or create the mutex guarding one bucket.
    async fn lock_for(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl std::fmt::Debug for TicketResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketResolver")
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
