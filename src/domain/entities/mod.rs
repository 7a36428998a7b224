//! Domain entities - Core business objects

pub mod command;
pub mod id;
pub mod message;
pub mod outcome;
pub mod settings;
pub mod user;

pub use command::{Command, CommandContext, CommandHandler, CommandRegistry, HandlerResult};
pub use id::{ChannelId, GuildId, MessageId, UserId};
pub use message::{Channel, ChannelKind, InboundMessage, MessageKind, Reply};
pub use outcome::DispatchOutcome;
pub use settings::{MutedUser, Prefix, DEFAULT_PREFIX};
pub use user::User;
