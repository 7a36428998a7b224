use super::{GuildId, UserId};
use serde::{Deserialize, Serialize};

/// Prefix used in guilds without a stored record
pub const DEFAULT_PREFIX: char = '!';

/// Per-guild command prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefix {
    pub guild_id: GuildId,
    pub symbol: char,
}

impl Prefix {
    pub fn new(guild_id: impl Into<GuildId>, symbol: char) -> Self {
        Self {
            guild_id: guild_id.into(),
            symbol,
        }
    }
}

/// Moderation state of a user; no record means not muted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutedUser {
    pub user_id: UserId,
    pub is_muted: bool,
}

impl MutedUser {
    pub fn new(user_id: impl Into<UserId>, is_muted: bool) -> Self {
        Self {
            user_id: user_id.into(),
            is_muted,
        }
    }
}
