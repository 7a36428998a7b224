use async_trait::async_trait;

use crate::domain::entities::{CommandContext, CommandHandler, HandlerResult, Reply};

/// `help` - list the registered commands
pub struct HelpCommand {
    text: String,
}

impl HelpCommand {
    /// Build from `(usage, description)` pairs, in display order
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut text = "Available commands:\n".to_string();
        for (name, description) in entries {
            text.push_str(&format!("  {} - {}\n", name, description));
        }
        Self {
            text: text.trim_end().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(&self, _args: &str, ctx: &CommandContext) -> HandlerResult {
        if let Err(e) = ctx.reply(Reply::text(self.text.clone())).await {
            tracing::warn!("[{}] Failed to send help: {}", ctx.message.channel.id, e);
        }
        Ok(())
    }
}
