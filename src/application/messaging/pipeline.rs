//! Ingestion pipeline - One run per inbound message
//!
//! Stage order is fixed: guild check, mute check, prefix resolution, dispatch.
//! A muted user's message never reaches a command handler.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::dispatcher::CommandDispatcher;
use super::mute::MuteFilter;
use super::prefix::PrefixResolver;
use crate::application::errors::BotError;
use crate::domain::entities::{CommandRegistry, DispatchOutcome, InboundMessage};
use crate::domain::traits::{BotInfo, ConfigStore, Messenger};

pub struct IngestionPipeline {
    store: Arc<dyn ConfigStore>,
    mute_filter: MuteFilter,
    prefixes: PrefixResolver,
    dispatcher: CommandDispatcher,
}

impl IngestionPipeline {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        messenger: Arc<dyn Messenger>,
        registry: Arc<CommandRegistry>,
        bot: &BotInfo,
        default_prefix: char,
    ) -> Self {
        Self {
            store,
            mute_filter: MuteFilter::new(Arc::clone(&messenger)),
            prefixes: PrefixResolver::new(default_prefix),
            dispatcher: CommandDispatcher::new(registry, messenger, bot.id),
        }
    }

    pub fn with_handler_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.dispatcher = self.dispatcher.with_timeout(timeout);
        self
    }

    /// Run every stage for one message and return its single outcome.
    ///
    /// `Err` only comes from the settings store; side-effect failures are logged.
    pub async fn run(&self, message: InboundMessage) -> Result<DispatchOutcome, BotError> {
        let Some(guild_id) = message.community_guild() else {
            tracing::debug!("[{}] Ignoring non-guild message {}", message.channel.id, message.id);
            return Ok(DispatchOutcome::NotAGuildMessage);
        };

        // Released on drop, whichever way this run ends
        let session = self.store.session().await?;

        if self
            .mute_filter
            .should_suppress(session.as_ref(), message.author.id)
            .await?
        {
            tracing::debug!(
                "[{}] Author {} is muted, suppressing message {}",
                message.channel.id,
                message.author.id,
                message.id
            );
            self.mute_filter.suppress(&message).await;
            return Ok(DispatchOutcome::Suppressed);
        }

        let prefix = self.prefixes.resolve(session.as_ref(), guild_id).await?;

        Ok(self.dispatcher.try_dispatch(&message, prefix).await)
    }

    /// Process a message on its own task, independent of other in-flight runs
    pub fn spawn(self: &Arc<Self>, message: InboundMessage) -> JoinHandle<Option<DispatchOutcome>> {
        let pipeline = Arc::clone(self);

        tokio::spawn(async move {
            let message_id = message.id;
            let channel_id = message.channel.id;

            match pipeline.run(message).await {
                Ok(outcome) => {
                    tracing::info!("[{}] Message {} -> {}", channel_id, message_id, outcome);
                    Some(outcome)
                }
                Err(e) => {
                    tracing::error!("[{}] Message {} failed: {}", channel_id, message_id, e);
                    None
                }
            }
        })
    }
}
