//! Domain traits - Abstractions for infrastructure implementations

pub mod messenger;
pub mod search;
pub mod store;

pub use messenger::{BotInfo, GuildChannel, Messenger};
pub use search::{WikiPage, WikiSearch};
pub use store::{ConfigSession, ConfigStore};
