//! Message handling - Per-message ingestion and dispatch

pub mod dispatcher;
pub mod mute;
pub mod parser;
pub mod pipeline;
pub mod prefix;

pub use dispatcher::CommandDispatcher;
pub use mute::MuteFilter;
pub use parser::{CommandParser, Invocation, ParsedCommand};
pub use pipeline::IngestionPipeline;
pub use prefix::PrefixResolver;
