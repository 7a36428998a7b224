//! Command dispatcher - Routes addressed messages to registered handlers

use std::sync::Arc;
use std::time::Duration;

use super::parser::{CommandParser, ParsedCommand};
use crate::application::errors::CommandError;
use crate::domain::entities::{
    CommandContext, CommandRegistry, DispatchOutcome, HandlerResult, InboundMessage, Reply,
    UserId,
};
use crate::domain::traits::Messenger;

pub struct CommandDispatcher {
    parser: CommandParser,
    registry: Arc<CommandRegistry>,
    messenger: Arc<dyn Messenger>,
    timeout: Option<Duration>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>, messenger: Arc<dyn Messenger>, bot_id: UserId) -> Self {
        Self {
            parser: CommandParser::new(bot_id),
            registry,
            messenger,
            timeout: None,
        }
    }

    /// Bound each handler run; an overrun counts as a failed command
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Match the message against the prefix or a mention of the bot and run the command.
    ///
    /// A failed or unknown command is reported back into the originating channel.
    /// Successful handlers send their own replies.
    pub async fn try_dispatch(&self, message: &InboundMessage, prefix: char) -> DispatchOutcome {
        let Some(parsed) = self.parser.parse(&message.text, prefix) else {
            return DispatchOutcome::NoPrefixMatch;
        };

        tracing::debug!(
            "[{}] Dispatching '{}' ({:?})",
            message.channel.id,
            parsed.name,
            parsed.invocation
        );

        let ctx = CommandContext::new(message.clone(), Arc::clone(&self.messenger));

        match self.execute(&parsed, &ctx).await {
            Ok(()) => DispatchOutcome::CommandSucceeded,
            Err(e) => {
                let reason = e.reason();
                self.report_failure(&ctx, &reason).await;
                DispatchOutcome::CommandFailed(reason)
            }
        }
    }

    async fn execute(&self, parsed: &ParsedCommand<'_>, ctx: &CommandContext) -> HandlerResult {
        let command = self
            .registry
            .get(parsed.name)
            .ok_or_else(|| CommandError::NotFound(parsed.name.to_string()))?;

        let run = command.handler.execute(parsed.args, ctx);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| CommandError::TimedOut)?,
            None => run.await,
        }
    }

    async fn report_failure(&self, ctx: &CommandContext, reason: &str) {
        if let Err(e) = ctx.reply(Reply::text(reason)).await {
            tracing::warn!(
                "[{}] Failed to report command failure: {}",
                ctx.message.channel.id,
                e
            );
        }
    }
}
