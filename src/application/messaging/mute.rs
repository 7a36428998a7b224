//! Mute filter - Keeps muted users' messages out of the pipeline

use std::sync::Arc;

use crate::application::errors::StorageError;
use crate::domain::entities::{InboundMessage, UserId};
use crate::domain::traits::{ConfigSession, Messenger};

pub struct MuteFilter {
    messenger: Arc<dyn Messenger>,
}

impl MuteFilter {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger }
    }

    /// True iff the author has a mute record with the flag set
    pub async fn should_suppress(
        &self,
        session: &dyn ConfigSession,
        author: UserId,
    ) -> Result<bool, StorageError> {
        session.is_muted(author).await
    }

    /// Remove the message where the channel allows it. Failures are logged only.
    pub async fn suppress(&self, message: &InboundMessage) {
        if !message.channel.supports_delete() {
            tracing::debug!(
                "[{}] Channel does not support deletion, suppressing message {} silently",
                message.channel.id,
                message.id
            );
            return;
        }

        if let Err(e) = self
            .messenger
            .delete_message(message.channel.id, message.id)
            .await
        {
            tracing::warn!(
                "[{}] Failed to delete message {} from muted user {}: {}",
                message.channel.id,
                message.id,
                message.author.id,
                e
            );
        }
    }
}
