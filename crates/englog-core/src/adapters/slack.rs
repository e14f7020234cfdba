//! # Slack Directory and Notifier Adapters
//!
//! Binds the actor directory to `users.info` and the notifier to
//! `chat.postMessage`. Posting to a bare user id lands in the bot's DM
//! channel with that user.

use async_trait::async_trait;
use slack_bot_sdk::SlackClient;
use tracing::debug;

use crate::directory::ActorDirectory;
use crate::notifier::{Notifier, NotifyOutcome};
use crate::{ActorId, DirectoryError, NotifyError};

/// Workspace profile directory backed by the Slack Web API.
#[derive(Debug, Clone)]
pub struct SlackActorDirectory {
    client: SlackClient,
}

impl SlackActorDirectory {
    /// Create a directory over a Slack client.
    pub fn new(client: SlackClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ActorDirectory for SlackActorDirectory {
    async fn lookup_email(&self, actor: &ActorId) -> Result<String, DirectoryError> {
        let email = self
            .client
            .user_email(actor.as_str())
            .await
            .map_err(|e| DirectoryError::LookupFailed {
                message: e.to_string(),
            })?;
        debug!(actor = %actor, "Resolved actor attribution");
        Ok(email)
    }
}

/// DM notifier backed by the Slack Web API.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: SlackClient,
}

impl SlackNotifier {
    /// Create a notifier over a Slack client.
    pub fn new(client: SlackClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, actor: &ActorId, outcome: &NotifyOutcome) -> Result<(), NotifyError> {
        self.client
            .post_message(actor.as_str(), &outcome.message())
            .await
            .map_err(|e| NotifyError::DeliveryFailed {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "slack_tests.rs"]
mod tests;
