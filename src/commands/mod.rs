//! Command set - every handler the bot knows, registered in one place

pub mod help;
pub mod ping;
pub mod wiki;

use std::sync::Arc;

use crate::domain::entities::{Command, CommandRegistry};
use crate::domain::traits::WikiSearch;

pub use help::HelpCommand;
pub use ping::PingCommand;
pub use wiki::WikiCommand;

/// Build the command table used for the lifetime of the process
pub fn registry(wiki: Arc<dyn WikiSearch>) -> CommandRegistry {
    let mut registry = CommandRegistry::new()
        .with(
            Command::new("wiki", WikiCommand::new(wiki))
                .with_description("Gets a wiki page")
                .with_usage("wiki <query>"),
        )
        .with(Command::new("ping", PingCommand).with_description("Check the bot is alive"));

    let mut entries = help_entries(&registry);
    entries.push(("help".to_string(), "Show this message".to_string()));
    entries.sort();

    let help = HelpCommand::new(entries.iter().map(|(u, d)| (u.as_str(), d.as_str())));
    registry.register(Command::new("help", help).with_description("Show this message"));

    tracing::info!("Registered {} commands", registry.len());
    registry
}

/// Usage line (or bare name) and description of every registered command
fn help_entries(registry: &CommandRegistry) -> Vec<(String, String)> {
    registry
        .all()
        .iter()
        .map(|c| {
            let usage = c.usage.clone().unwrap_or_else(|| c.name.clone());
            (usage, c.description.clone().unwrap_or_default())
        })
        .collect()
}
