//! Resolution cache trait and in-memory implementation.
//!
//! The cache is owned by the ticket resolver: it is the only component that
//! reads or writes it, always under per-key exclusion. Entries record which
//! tracker ticket a `(actor, category, period)` bucket resolved to, so
//! repeat submissions skip the tracker entirely.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{ActorId, TicketKey, WorkCategory};

/// Cache key of one resolution bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Owning actor
    pub actor: ActorId,

    /// Work classification
    pub category: WorkCategory,

    /// Period label under monthly bucketing, `None` under process lifetime
    pub period: Option<String>,
}

impl CacheKey {
    /// Build a cache key for a resolution bucket.
    pub fn new(actor: ActorId, category: WorkCategory, period: Option<String>) -> Self {
        Self {
            actor,
            category,
            period,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.period {
            Some(period) => write!(f, "{}/{}/{}", self.actor, self.category, period),
            None => write!(f, "{}/{}", self.actor, self.category),
        }
    }
}

/// One cached resolution.
#[derive(Debug, Clone)]
pub struct ResolutionCacheEntry {
    /// Bucket the resolution belongs to
    pub key: CacheKey,

    /// Ticket the bucket resolved to
    pub ticket_key: TicketKey,

    /// When the resolution was recorded
    pub resolved_at: DateTime<Utc>,
}

/// Store for resolved ticket keys, injected into the resolver.
///
/// Only successful resolutions are ever stored. The trait keeps the resolver
/// testable and leaves room for a shared store later; the in-memory map is
/// the only implementation today.
#[async_trait]
pub trait ResolutionCache: Send + Sync {
    /// Look up the resolution for a bucket.
    async fn get(&self, key: &CacheKey) -> Option<ResolutionCacheEntry>;

    /// Record a successful resolution, replacing any previous entry.
    async fn put(&self, key: CacheKey, ticket: TicketKey);
}

/// In-memory resolution cache.
///
/// Entries live for the process lifetime. Under monthly bucketing the period
/// label inside the key rolls over instead, so stale months simply stop
/// matching; no eviction is needed at this scale.
#[derive(Debug, Default)]
pub struct InMemoryResolutionCache {
    entries: RwLock<HashMap<CacheKey, ResolutionCacheEntry>>,
}

impl InMemoryResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached resolutions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no resolutions.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResolutionCache for InMemoryResolutionCache {
    async fn get(&self, key: &CacheKey) -> Option<ResolutionCacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    async fn put(&self, key: CacheKey, ticket: TicketKey) {
        let entry = ResolutionCacheEntry {
            key: key.clone(),
            ticket_key: ticket,
            resolved_at: Utc::now(),
        };
        self.entries.write().await.insert(key, entry);
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
