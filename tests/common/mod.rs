//! Shared fakes for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use simpbot::application::errors::{BotError, CommandError, StorageError};
use simpbot::domain::entities::{
    Channel, ChannelId, ChannelKind, CommandContext, CommandHandler, GuildId, HandlerResult,
    InboundMessage, MessageId, Reply, User, UserId,
};
use simpbot::domain::traits::{
    BotInfo, ConfigSession, ConfigStore, GuildChannel, Messenger, WikiPage, WikiSearch,
};

pub const BOT_ID: u64 = 999;
pub const GUILD: u64 = 1;
pub const CHANNEL: u64 = 10;
pub const AUTHOR: u64 = 100;

pub fn bot_info() -> BotInfo {
    BotInfo {
        id: BOT_ID.into(),
        name: "simpbot".to_string(),
    }
}

pub fn guild_message(id: u64, author: u64, text: &str) -> InboundMessage {
    InboundMessage::new(id, Channel::new(CHANNEL, ChannelKind::GuildText), User::new(author), text)
        .in_guild(GUILD)
}

pub fn direct_message(id: u64, author: u64, text: &str) -> InboundMessage {
    InboundMessage::new(id, Channel::new(author, ChannelKind::Direct), User::new(author), text)
}

/// Messenger that records every call
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<(ChannelId, Reply)>>,
    pub deleted: Mutex<Vec<(ChannelId, MessageId)>>,
    pub channels: Mutex<Vec<GuildChannel>>,
    pub fail_sends: AtomicBool,
    pub fail_deletes: AtomicBool,
}

impl RecordingMessenger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(ChannelId, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<(ChannelId, MessageId)> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_reply(&self, channel_id: ChannelId, reply: Reply) -> Result<MessageId, BotError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(BotError::Network("missing permissions".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((channel_id, reply));
        Ok(MessageId(10_000 + sent.len() as u64))
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), BotError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BotError::Network("unknown message".to_string()));
        }
        self.deleted.lock().unwrap().push((channel_id, message_id));
        Ok(())
    }

    async fn guild_text_channels(&self, _guild_id: GuildId) -> Result<Vec<GuildChannel>, BotError> {
        Ok(self.channels.lock().unwrap().clone())
    }
}

/// Handler that counts calls and returns a fixed result
pub struct CountingHandler {
    pub calls: Arc<AtomicUsize>,
    pub args: Arc<Mutex<Vec<String>>>,
    result: HandlerResult,
}

impl CountingHandler {
    pub fn ok() -> Self {
        Self::with_result(Ok(()))
    }

    pub fn failing(reason: &str) -> Self {
        Self::with_result(Err(CommandError::ExecutionFailed(reason.to_string())))
    }

    fn with_result(result: HandlerResult) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            args: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }
}

#[async_trait]
impl CommandHandler for CountingHandler {
    async fn execute(&self, args: &str, _ctx: &CommandContext) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.args.lock().unwrap().push(args.to_string());
        self.result.clone()
    }
}

/// Handler that takes longer than any reasonable test timeout
pub struct SlowHandler(pub Duration);

#[async_trait]
impl CommandHandler for SlowHandler {
    async fn execute(&self, _args: &str, _ctx: &CommandContext) -> HandlerResult {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Wiki lookup that echoes the query as the page title
pub struct FakeWiki;

#[async_trait]
impl WikiSearch for FakeWiki {
    async fn search_page(&self, query: &str) -> Result<Option<WikiPage>, BotError> {
        if query == "nothing" {
            return Ok(None);
        }
        Ok(Some(WikiPage {
            title: query.to_string(),
            link: format!("https://en.wikipedia.org/wiki/{}", query),
        }))
    }
}

/// Settings store whose backend is unreachable, either entirely or for one author
pub struct FailingStore {
    unreachable: bool,
    broken_user: Option<UserId>,
    pub open_sessions: Arc<AtomicUsize>,
}

impl FailingStore {
    /// Every `session()` call fails
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            broken_user: None,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sessions open, but the mute lookup fails for `user`
    pub fn broken_for(user: u64) -> Self {
        Self {
            unreachable: false,
            broken_user: Some(UserId(user)),
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }
}

fn backend_down() -> StorageError {
    StorageError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "settings backend unreachable",
    ))
}

#[async_trait]
impl ConfigStore for FailingStore {
    async fn session(&self) -> Result<Box<dyn ConfigSession>, StorageError> {
        if self.unreachable {
            return Err(backend_down());
        }
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FailingSession {
            broken_user: self.broken_user,
            open_sessions: Arc::clone(&self.open_sessions),
        }))
    }
}

struct FailingSession {
    broken_user: Option<UserId>,
    open_sessions: Arc<AtomicUsize>,
}

#[async_trait]
impl ConfigSession for FailingSession {
    async fn get_prefix(&self, _guild_id: GuildId) -> Result<Option<char>, StorageError> {
        Ok(None)
    }

    async fn is_muted(&self, user_id: UserId) -> Result<bool, StorageError> {
        if self.broken_user == Some(user_id) {
            tokio::task::yield_now().await;
            return Err(backend_down());
        }
        Ok(false)
    }
}

impl Drop for FailingSession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}
