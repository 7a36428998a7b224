use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::{GuildId, MessageId, Reply};
use crate::domain::traits::Messenger;

/// Name fragment of the channel announcements go to
const ANNOUNCE_CHANNEL: &str = "general";

/// Posts bot-initiated messages into a guild
pub struct AnnounceService {
    messenger: Arc<dyn Messenger>,
}

impl AnnounceService {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger }
    }

    /// Send text to the first text channel whose name contains "general".
    ///
    /// Fails with `NotFound` when the guild has no such channel; nothing is retried.
    pub async fn announce(&self, guild_id: GuildId, text: &str) -> Result<MessageId, BotError> {
        let channels = self.messenger.guild_text_channels(guild_id).await?;

        let channel = channels
            .iter()
            .find(|c| c.name.contains(ANNOUNCE_CHANNEL))
            .ok_or_else(|| BotError::NotFound(format!("can't get a channel in guild {}", guild_id)))?;

        tracing::info!("Announcing in guild {} channel #{}", guild_id, channel.name);
        self.messenger.send_reply(channel.id, Reply::text(text)).await
    }
}
