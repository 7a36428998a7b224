//! Console adapter for development/testing
//!
//! Every stdin line becomes a message in the configured guild channel.
//! `dm:<text>` delivers a direct message, `as:<user id> <text>` changes the author.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::application::services::ReadySignal;
use crate::domain::entities::{
    Channel, ChannelId, ChannelKind, GuildId, InboundMessage, MessageId, Reply, User, UserId,
};
use crate::domain::traits::{BotInfo, GuildChannel, Messenger};
use crate::infrastructure::config::ConsoleConfig;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    config: ConsoleConfig,
    next_id: AtomicU64,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>, config: ConsoleConfig) -> Self {
        Self {
            info: BotInfo {
                id: UserId(config.bot_user_id),
                name: name.into(),
            },
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }

    /// Turn one input line into a gateway event
    pub fn parse_line(&self, line: &str) -> InboundMessage {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let (author, line) = match line.strip_prefix("as:").and_then(|rest| rest.split_once(' ')) {
            Some((user, rest)) => match user.parse::<u64>() {
                Ok(user) => (user, rest),
                Err(_) => (self.config.author_id, line),
            },
            None => (self.config.author_id, line),
        };

        if let Some(text) = line.strip_prefix("dm:") {
            let channel = Channel::new(self.config.author_id, ChannelKind::Direct);
            return InboundMessage::new(id, channel, User::new(author), text.trim_start());
        }

        let channel = Channel::new(self.config.channel_id, ChannelKind::GuildText);
        InboundMessage::new(id, channel, User::new(author), line).in_guild(self.config.guild_id)
    }

    /// Signal readiness, then forward stdin lines until EOF
    pub async fn listen(
        &self,
        ready: &ReadySignal,
        events: mpsc::Sender<InboundMessage>,
    ) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        ready.signal(self.bot_info());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| BotError::Internal(format!("stdin: {}", e)))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if events.send(self.parse_line(line)).await.is_err() {
                tracing::debug!("Event receiver closed, stopping console gateway");
                break;
            }
        }

        tracing::info!("Console input closed");
        Ok(())
    }
}

#[async_trait]
impl Messenger for ConsoleAdapter {
    async fn send_reply(&self, channel_id: ChannelId, reply: Reply) -> Result<MessageId, BotError> {
        match reply {
            Reply::Text(text) => println!("[BOT #{}] {}", channel_id, text),
            Reply::Embed {
                content,
                title,
                description,
            } => {
                if let Some(content) = content {
                    println!("[BOT #{}] {}", channel_id, content);
                }
                println!("  [Embed] {}", title);
                println!("          {}", description);
            }
        }
        Ok(MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), BotError> {
        println!("[BOT #{}] (deleted message {})", channel_id, message_id);
        Ok(())
    }

    async fn guild_text_channels(&self, guild_id: GuildId) -> Result<Vec<GuildChannel>, BotError> {
        if guild_id != GuildId(self.config.guild_id) {
            return Ok(Vec::new());
        }
        Ok(vec![GuildChannel::new(self.config.channel_id, "general")])
    }
}
