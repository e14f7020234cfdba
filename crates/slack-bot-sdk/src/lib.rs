//! # Slack Bot SDK
//!
//! Slack platform primitives for the Englog bridge: request signature
//! verification, inbound payload models for slash commands and modal
//! submissions, the Web API client used for modals, user lookups, and
//! direct messages, and the work-log modal definition.
//!
//! ## Security
//!
//! Inbound requests are authenticated with Slack's signed-secrets scheme:
//! an HMAC-SHA256 over `v0:{timestamp}:{body}` compared in constant time
//! against the `X-Slack-Signature` header, with a bounded timestamp skew
//! window to reject replays. See [`SignatureVerifier`].
//!
//! ## Usage
//!
//! ```rust
//! use slack_bot_sdk::SignatureVerifier;
//!
//! let verifier = SignatureVerifier::new("signing-secret");
//! let ok = verifier.verify("1700000000", "v0=abc123", b"command=%2Fexample");
//! assert!(!ok);
//! ```

pub mod client;
pub mod payloads;
pub mod signature;
pub mod views;

pub use client::{SlackApiError, SlackClient, SlackClientConfig};
pub use payloads::{SlackUser, SlashCommand, SubmittedView, ViewState, ViewSubmission};
pub use signature::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use views::{
    work_log_modal, CATEGORY_BLOCK_ID, DESCRIPTION_BLOCK_ID, DURATION_BLOCK_ID,
    LOG_MODAL_CALLBACK_ID, VALUE_ACTION_ID,
};
