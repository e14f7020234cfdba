//! # Englog Core
//!
//! Core business logic for the Englog work-log bridge: classifying inbound
//! chat-platform events, parsing work-log form submissions, resolving them to
//! issue-tracker tickets idempotently, appending audit comments, and
//! notifying the submitting actor.
//!
//! ## Architecture
//!
//! The core depends only on trait abstractions at its seams:
//! - [`tracker::TicketTracker`] for the issue tracker,
//! - [`cache::ResolutionCache`] for the resolution cache,
//! - [`directory::ActorDirectory`] for actor attribution lookups,
//! - [`notifier::Notifier`] for actor-facing messages.
//!
//! Concrete implementations binding those traits to the Slack and Jira
//! clients live in [`adapters`] and are injected at startup.
//!
//! ## Usage
//!
//! ```rust
//! use englog_core::{ActorId, PeriodPolicy, WorkCategory};
//!
//! let actor = ActorId::new("U123");
//! let category = WorkCategory::Interviewing;
//! assert_eq!(category.as_str(), "Interviewing");
//! assert_eq!(PeriodPolicy::default(), PeriodPolicy::Lifetime);
//! # let _ = actor;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Domain Identifier Types
// ============================================================================

/// Stable identifier of the actor who invoked a command or submitted a form
///
/// Opaque platform identifier (e.g. a Slack user id such as `"U123"`); never
/// displayed to humans when an email attribution is available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Wrap a platform-assigned actor id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get string representation of the actor id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project-scoped ticket identifier in the issue tracker (e.g. `"ENGLOG-55"`)
///
/// Uniquely identifies a ticket within the tracker's namespace. Assigned by
/// the tracker on creation, never synthesized locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketKey(String);

impl TicketKey {
    /// Wrap a tracker-assigned ticket key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get string representation of the ticket key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Domain Data Types
// ============================================================================

/// Closed set of work classifications offered by the work-log form
///
/// The modal's category selector offers exactly these options; anything else
/// in a submission is a [`ParseError::InvalidOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkCategory {
    Documentation,
    Interviewing,
    Learning,
    Misc,
}

impl WorkCategory {
    /// Every category, in the order the form presents them
    pub const ALL: [WorkCategory; 4] = [
        WorkCategory::Documentation,
        WorkCategory::Interviewing,
        WorkCategory::Learning,
        WorkCategory::Misc,
    ];

    /// Get the display label, which doubles as the select-option value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documentation => "Documentation",
            Self::Interviewing => "Interviewing",
            Self::Learning => "Learning",
            Self::Misc => "Misc",
        }
    }

    /// Look up a category by its exact label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of the invoking user
///
/// The stable id arrives with every event; the email attribution is resolved
/// lazily from the chat platform when ticket attribution needs it. Not
/// persisted beyond the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Platform-assigned stable identifier
    pub id: ActorId,

    /// Workspace email, when resolved
    pub email: Option<String>,
}

impl Actor {
    /// Create an actor with no resolved email
    pub fn new(id: ActorId) -> Self {
        Self { id, email: None }
    }

    /// Attach a resolved email attribution
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Get the attribution string used in summaries and audit comments:
    /// the email when resolved, otherwise the stable id
    pub fn attribution(&self) -> &str {
        self.email.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// One normalized work-log form submission
///
/// Produced once per form-submission event by the parser; immutable afterward
/// apart from the lazy email attribution on the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// Who performed the work
    pub actor: Actor,

    /// What kind of work it was
    pub category: WorkCategory,

    /// Free-text duration as typed into the form (e.g. `"1h"`, `"30m"`)
    pub duration: String,

    /// Free-text description of the work
    pub description: String,
}

/// Ticket bucketing policy of the resolver
///
/// Decides whether one ticket per `(actor, category)` lives for the process
/// lifetime or a fresh one is started each calendar month. The policy also
/// owns the deterministic summary template, so distinct resolver instances
/// compute identical search keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPolicy {
    /// One ticket per (actor, category) for as long as the tracker holds it
    #[default]
    Lifetime,
    /// One ticket per (actor, category, calendar month)
    Monthly,
}

impl PeriodPolicy {
    /// Get the period label for a point in time, `None` under the lifetime
    /// policy and `"YYYY-MM"` under monthly bucketing
    pub fn period_label(&self, now: DateTime<Utc>) -> Option<String> {
        match self {
            Self::Lifetime => None,
            Self::Monthly => Some(now.format("%Y-%m").to_string()),
        }
    }

    /// Render the deterministic ticket summary for an actor and category
    ///
    /// The summary is derived solely from its inputs so that search-based
    /// deduplication finds tickets created by any instance.
    pub fn ticket_summary(
        &self,
        category: WorkCategory,
        attribution: &str,
        now: DateTime<Utc>,
    ) -> String {
        match self.period_label(now) {
            Some(period) => format!("{} - {} by {}", category, period, attribution),
            None => format!("{} by {}", category, attribution),
        }
    }

    /// Render the description body for a newly created ticket
    pub fn ticket_description(
        &self,
        category: WorkCategory,
        attribution: &str,
        now: DateTime<Utc>,
    ) -> String {
        let mut description = format!(
            "Off-queue work log.\n*Engineer:* {}\n*Category:* {}",
            attribution, category
        );
        if let Some(period) = self.period_label(now) {
            description.push_str(&format!("\n*Period:* {}", period));
        }
        description
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// High-level error categorization for alerting decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Temporary failures that may succeed on a later submission
    Transient,
    /// Permanent failures that won't succeed on retry
    Permanent,
    /// Security-related failures requiring attention
    Security,
    /// Configuration errors preventing startup
    Configuration,
}

/// Error type for work-log form parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A required field identifier is absent from the submitted view state
    #[error("Required field '{field}' is missing from the submission")]
    MissingField { field: String },

    /// The category selector carried a value outside the enumerated set
    #[error("'{value}' is not a recognized work category")]
    InvalidOption { value: String },

    /// A required text field was present but blank
    #[error("Field '{field}' is empty")]
    Empty { field: String },
}

/// Error type for ticket resolution failures
///
/// A failed resolution is never cached; the next submission retries from
/// scratch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolutionError {
    /// The tracker could not be reached or rejected the search/create
    #[error("Ticket tracker unavailable: {message}")]
    TrackerUnavailable { message: String },
}

/// Error type for audit comment failures
///
/// Raised after a successful resolution; the resolved ticket stays cached.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PostError {
    /// The tracker could not be reached or rejected the comment
    #[error("Ticket tracker unavailable: {message}")]
    TrackerUnavailable { message: String },
}

/// Error type for actor notification failures
///
/// Logged and swallowed at the pipeline boundary; there is no second channel
/// to report a broken first one.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotifyError {
    /// The chat platform refused or failed to deliver the message
    #[error("Notification delivery failed: {message}")]
    DeliveryFailed { message: String },
}

/// Error type for actor directory lookups
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// The chat platform could not resolve the actor's attribution
    #[error("Actor lookup failed: {message}")]
    LookupFailed { message: String },
}

// ============================================================================
// Module declarations
// ============================================================================

/// Adapters binding core traits to the Slack and Jira clients
pub mod adapters;

/// Resolution cache trait and in-memory implementation
pub mod cache;

/// Actor directory trait for attribution lookups
pub mod directory;

/// Inbound event classification
pub mod events;

/// Actor notification trait and outcome messages
pub mod notifier;

/// Work-log form submission parsing
pub mod parser;

/// Submission pipeline orchestration
pub mod pipeline;

/// Audit comment formatting and posting
pub mod poster;

/// Idempotent ticket resolution
pub mod resolver;

/// Ticket tracker trait
pub mod tracker;

// Re-export key types for convenience
pub use adapters::{JiraTicketTracker, SlackActorDirectory, SlackNotifier};
pub use cache::{CacheKey, InMemoryResolutionCache, ResolutionCache, ResolutionCacheEntry};
pub use directory::ActorDirectory;
pub use events::IncomingEvent;
pub use notifier::{Notifier, NotifyOutcome};
pub use parser::parse_submission;
pub use pipeline::{PipelineError, WorkLogPipeline};
pub use poster::{format_audit_comment, CommentPoster};
pub use resolver::TicketResolver;
pub use tracker::TicketTracker;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
