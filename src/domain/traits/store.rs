use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::{GuildId, UserId};

/// Source of per-guild settings; hands out one session per pipeline run
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Open a scoped handle; it is released when dropped
    async fn session(&self) -> Result<Box<dyn ConfigSession>, StorageError>;
}

/// Read operations consumed by the ingestion pipeline
#[async_trait]
pub trait ConfigSession: Send + Sync {
    /// Stored prefix symbol for the guild, if any
    async fn get_prefix(&self, guild_id: GuildId) -> Result<Option<char>, StorageError>;

    /// Whether a mute record exists for the user with the muted flag set
    async fn is_muted(&self, user_id: UserId) -> Result<bool, StorageError>;
}
