use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::{ChannelId, GuildId, MessageId, Reply, UserId};

/// Messenger trait - send and delete capability of the chat platform
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post a reply into a channel, returning the id of the sent message
    async fn send_reply(&self, channel_id: ChannelId, reply: Reply) -> Result<MessageId, BotError>;

    /// Remove a message from a channel
    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), BotError>;

    /// Text channels of a guild, in platform order
    async fn guild_text_channels(&self, guild_id: GuildId) -> Result<Vec<GuildChannel>, BotError>;
}

/// Text channel inside a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildChannel {
    pub id: ChannelId,
    pub name: String,
}

impl GuildChannel {
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Identity of the connected bot account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    pub id: UserId,
    pub name: String,
}
