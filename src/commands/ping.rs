use async_trait::async_trait;

use crate::domain::entities::{CommandContext, CommandHandler, HandlerResult, Reply};

/// `ping` - liveness check
pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn execute(&self, _args: &str, ctx: &CommandContext) -> HandlerResult {
        if let Err(e) = ctx.reply(Reply::text("pong")).await {
            tracing::warn!("[{}] Failed to send pong: {}", ctx.message.channel.id, e);
        }
        Ok(())
    }
}
