//! simpbot - guild chat bot with per-guild prefixes and moderation mutes
//!
//! Every inbound message runs through [`IngestionPipeline`]: non-guild messages are
//! ignored, muted authors are suppressed, the guild prefix is resolved and the
//! addressed command is dispatched.

pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{BotError, CommandError, ConfigError, StorageError};
pub use application::messaging::IngestionPipeline;
pub use domain::entities::DispatchOutcome;
