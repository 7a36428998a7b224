use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandContext, CommandHandler, HandlerResult, Reply};
use crate::domain::traits::WikiSearch;

/// `wiki <query>` - link the best matching wiki page
pub struct WikiCommand {
    search: Arc<dyn WikiSearch>,
}

impl WikiCommand {
    pub fn new(search: Arc<dyn WikiSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl CommandHandler for WikiCommand {
    async fn execute(&self, args: &str, ctx: &CommandContext) -> HandlerResult {
        let query = args.trim();
        if query.is_empty() {
            return Err(CommandError::InvalidArgs("missing search query".to_string()));
        }

        let page = self
            .search
            .search_page(query)
            .await
            .map_err(|e| {
                tracing::warn!("Wiki search for '{}' failed: {}", query, e);
                CommandError::ExecutionFailed("wiki search is unavailable".to_string())
            })?
            .ok_or_else(|| CommandError::ExecutionFailed(format!("no page found for `{}`", query)))?;

        let reply = Reply::embed(page.title, page.link).with_content(ctx.message.author.mention());
        if let Err(e) = ctx.reply(reply).await {
            tracing::warn!("[{}] Failed to send wiki reply: {}", ctx.message.channel.id, e);
        }
        Ok(())
    }
}
