use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::{InboundMessage, Reply};
use crate::application::errors::{BotError, CommandError};
use crate::domain::traits::Messenger;

/// Handler outcome; an `Err` carries the reason shown to the user
pub type HandlerResult = Result<(), CommandError>;

/// Per-invocation state handed to a command handler
#[derive(Clone)]
pub struct CommandContext {
    pub message: InboundMessage,
    pub messenger: Arc<dyn Messenger>,
}

impl CommandContext {
    pub fn new(message: InboundMessage, messenger: Arc<dyn Messenger>) -> Self {
        Self { message, messenger }
    }

    /// Send a reply into the channel the command came from
    pub async fn reply(&self, reply: Reply) -> Result<(), BotError> {
        self.messenger
            .send_reply(self.message.channel.id, reply)
            .await
            .map(|_| ())
    }
}

/// A unit of command logic bound to a token
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run the command with the text that followed the token
    async fn execute(&self, args: &str, ctx: &CommandContext) -> HandlerResult;
}

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            usage: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }
}

/// Command table, filled once at startup and read-only afterwards
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        if self.commands.contains_key(&command.name) {
            tracing::warn!("Command '{}' registered twice, keeping the latest", command.name);
        }
        self.commands.insert(command.name.clone(), command);
    }

    pub fn with(mut self, command: Command) -> Self {
        self.register(command);
        self
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands sorted by name
    pub fn all(&self) -> Vec<&Command> {
        let mut all: Vec<&Command> = self.commands.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait]
    impl CommandHandler for Noop {
        async fn execute(&self, _args: &str, _ctx: &CommandContext) -> HandlerResult {
            Ok(())
        }
    }

    #[test]
    fn lookup_is_exact() {
        let registry = CommandRegistry::new().with(Command::new("wiki", Noop));

        assert!(registry.get("wiki").is_some());
        assert!(registry.get("Wiki").is_none());
        assert!(registry.get("wik").is_none());
    }

    #[test]
    fn all_is_sorted() {
        let registry = CommandRegistry::new()
            .with(Command::new("wiki", Noop))
            .with(Command::new("help", Noop))
            .with(Command::new("ping", Noop));

        let names: Vec<&str> = registry.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["help", "ping", "wiki"]);
    }

    #[test]
    fn reregistering_replaces() {
        let registry = CommandRegistry::new()
            .with(Command::new("ping", Noop).with_description("old"))
            .with(Command::new("ping", Noop).with_description("new"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("ping").and_then(|c| c.description.as_deref()),
            Some("new")
        );
    }
}
