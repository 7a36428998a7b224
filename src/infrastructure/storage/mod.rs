//! In-memory settings store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::{GuildId, MutedUser, Prefix, UserId};
use crate::domain::traits::{ConfigSession, ConfigStore};

#[derive(Default)]
struct Tables {
    prefixes: RwLock<HashMap<GuildId, char>>,
    muteds: RwLock<HashMap<UserId, bool>>,
}

/// Volatile store with the same contract as the SQLite one
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
    open_sessions: Arc<AtomicUsize>,
    sessions_opened: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_prefix(&self, prefix: Prefix) {
        let mut prefixes = self.tables.prefixes.write().await;
        prefixes.insert(prefix.guild_id, prefix.symbol);
    }

    pub async fn clear_prefix(&self, guild_id: GuildId) -> bool {
        let mut prefixes = self.tables.prefixes.write().await;
        prefixes.remove(&guild_id).is_some()
    }

    pub async fn set_muted(&self, muted: MutedUser) {
        let mut muteds = self.tables.muteds.write().await;
        muteds.insert(muted.user_id, muted.is_muted);
    }

    /// Sessions handed out and not yet dropped
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    /// Sessions handed out over the store's lifetime
    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn session(&self) -> Result<Box<dyn ConfigSession>, StorageError> {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            tables: Arc::clone(&self.tables),
            open_sessions: Arc::clone(&self.open_sessions),
        }))
    }
}

struct MemorySession {
    tables: Arc<Tables>,
    open_sessions: Arc<AtomicUsize>,
}

#[async_trait]
impl ConfigSession for MemorySession {
    async fn get_prefix(&self, guild_id: GuildId) -> Result<Option<char>, StorageError> {
        let prefixes = self.tables.prefixes.read().await;
        Ok(prefixes.get(&guild_id).copied())
    }

    async fn is_muted(&self, user_id: UserId) -> Result<bool, StorageError> {
        let muteds = self.tables.muteds.read().await;
        Ok(muteds.get(&user_id).copied().unwrap_or(false))
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unmuted_record_is_not_muted() {
        let store = MemoryStore::new();
        store.set_muted(MutedUser::new(1, true)).await;
        store.set_muted(MutedUser::new(2, false)).await;

        let session = store.session().await.unwrap();
        assert!(session.is_muted(UserId(1)).await.unwrap());
        assert!(!session.is_muted(UserId(2)).await.unwrap());
        assert!(!session.is_muted(UserId(3)).await.unwrap());
    }

    #[tokio::test]
    async fn prefix_can_be_cleared() {
        let store = MemoryStore::new();
        store.set_prefix(Prefix::new(1, '?')).await;
        assert!(store.clear_prefix(GuildId(1)).await);
        assert!(!store.clear_prefix(GuildId(1)).await);

        let session = store.session().await.unwrap();
        assert_eq!(session.get_prefix(GuildId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_counters() {
        let store = MemoryStore::new();
        {
            let _a = store.session().await.unwrap();
            let _b = store.session().await.unwrap();
            assert_eq!(store.open_sessions(), 2);
        }
        assert_eq!(store.open_sessions(), 0);
        assert_eq!(store.sessions_opened(), 2);
    }
}
