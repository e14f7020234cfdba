//! # Platform Adapters
//!
//! Bindings of the core traits to the Jira and Slack clients.

pub mod jira;
pub mod slack;

pub use jira::{summary_search_jql, JiraTicketTracker};
pub use slack::{SlackActorDirectory, SlackNotifier};
