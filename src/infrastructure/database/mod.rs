//! SQLite-backed guild settings

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::errors::StorageError;
use crate::domain::entities::{GuildId, MutedUser, Prefix, UserId};
use crate::domain::traits::{ConfigSession, ConfigStore};

// SQLite integers are signed; ids are stored bit-for-bit.
fn to_sql(id: u64) -> i64 {
    id as i64
}

fn from_sql(id: i64) -> u64 {
    id as u64
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the file and make sure the schema exists
    pub fn create(path: impl AsRef<Path>) -> SqliteResult<Self> {
        let db = Self::connect(path)?;
        db.init_tables()?;
        Ok(db)
    }

    /// Open the file without touching the schema
    pub fn connect(path: impl AsRef<Path>) -> SqliteResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    fn init_tables(&self) -> SqliteResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS prefixes (
                guild_id INTEGER PRIMARY KEY,
                prefix_symbol TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS muteds (
                user_id INTEGER PRIMARY KEY,
                is_muted INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        Ok(())
    }

    // Prefixes
    pub fn get_prefix(&self, guild_id: GuildId) -> SqliteResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT prefix_symbol FROM prefixes WHERE guild_id = ?1",
                [to_sql(guild_id.get())],
                |row| row.get(0),
            )
            .optional()
    }

    pub fn set_prefix(&self, prefix: &Prefix) -> SqliteResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO prefixes (guild_id, prefix_symbol) VALUES (?1, ?2)",
            rusqlite::params![to_sql(prefix.guild_id.get()), prefix.symbol.to_string()],
        )?;
        Ok(())
    }

    pub fn clear_prefix(&self, guild_id: GuildId) -> SqliteResult<bool> {
        let rows = self.conn.execute(
            "DELETE FROM prefixes WHERE guild_id = ?1",
            [to_sql(guild_id.get())],
        )?;
        Ok(rows > 0)
    }

    // Mutes
    pub fn is_muted(&self, user_id: UserId) -> SqliteResult<bool> {
        let muted: Option<bool> = self
            .conn
            .query_row(
                "SELECT is_muted FROM muteds WHERE user_id = ?1",
                [to_sql(user_id.get())],
                |row| row.get(0),
            )
            .optional()?;
        Ok(muted.unwrap_or(false))
    }

    pub fn set_muted(&self, muted: &MutedUser) -> SqliteResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO muteds (user_id, is_muted) VALUES (?1, ?2)",
            rusqlite::params![to_sql(muted.user_id.get()), muted.is_muted],
        )?;
        Ok(())
    }

    pub fn list_muted(&self) -> SqliteResult<Vec<MutedUser>> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id, is_muted FROM muteds WHERE is_muted = 1 ORDER BY user_id")?;

        let rows = stmt.query_map([], |row| {
            Ok(MutedUser {
                user_id: UserId(from_sql(row.get(0)?)),
                is_muted: row.get(1)?,
            })
        })?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }
        Ok(users)
    }
}

/// Settings store on a SQLite file; every session gets its own connection
pub struct SqliteStore {
    path: PathBuf,
    open_sessions: Arc<AtomicUsize>,
}

impl SqliteStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Database::create(&path)?;
        tracing::info!("Settings database ready at {}", path.display());

        Ok(Self {
            path,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Direct handle for the administration commands
    pub fn admin(&self) -> Result<Database, StorageError> {
        Ok(Database::connect(&self.path)?)
    }

    /// Sessions handed out and not yet dropped
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for SqliteStore {
    async fn session(&self) -> Result<Box<dyn ConfigSession>, StorageError> {
        let path = self.path.clone();
        let db = tokio::task::spawn_blocking(move || Database::connect(path))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(SqliteSession {
            db: Arc::new(Mutex::new(db)),
            open_sessions: Arc::clone(&self.open_sessions),
        }))
    }
}

struct SqliteSession {
    db: Arc<Mutex<Database>>,
    open_sessions: Arc<AtomicUsize>,
}

impl SqliteSession {
    /// Run a query on the blocking pool; a locked file only stalls this session
    async fn with_db<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Database) -> SqliteResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<T, StorageError> {
            let db = db.lock().map_err(|_| StorageError::LockPoisoned)?;
            Ok(f(&*db)?)
        })
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))?
    }
}

#[async_trait]
impl ConfigSession for SqliteSession {
    async fn get_prefix(&self, guild_id: GuildId) -> Result<Option<char>, StorageError> {
        let stored = self.with_db(move |db| db.get_prefix(guild_id)).await?;

        Ok(stored.and_then(|symbol| {
            let first = symbol.chars().next();
            if first.is_none() {
                tracing::warn!("Empty prefix stored for guild {}, using default", guild_id);
            }
            first
        }))
    }

    async fn is_muted(&self, user_id: UserId) -> Result<bool, StorageError> {
        self.with_db(move |db| db.is_muted(user_id)).await
    }
}

impl Drop for SqliteSession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("settings.db")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn missing_records_are_absent() {
        let (_dir, store) = store();
        let session = store.session().await.unwrap();

        assert_eq!(session.get_prefix(GuildId(1)).await.unwrap(), None);
        assert!(!session.is_muted(UserId(2)).await.unwrap());
    }

    #[tokio::test]
    async fn admin_writes_are_visible_to_new_sessions() {
        let (_dir, store) = store();
        let admin = store.admin().unwrap();
        admin.set_prefix(&Prefix::new(1, '?')).unwrap();
        admin.set_muted(&MutedUser::new(2, true)).unwrap();
        admin.set_muted(&MutedUser::new(3, false)).unwrap();

        let session = store.session().await.unwrap();
        assert_eq!(session.get_prefix(GuildId(1)).await.unwrap(), Some('?'));
        assert!(session.is_muted(UserId(2)).await.unwrap());
        assert!(!session.is_muted(UserId(3)).await.unwrap());
    }

    #[tokio::test]
    async fn high_bit_ids_round_trip() {
        let (_dir, store) = store();
        let guild = GuildId(u64::MAX - 5);
        store.admin().unwrap().set_prefix(&Prefix::new(guild, '$')).unwrap();

        let session = store.session().await.unwrap();
        assert_eq!(session.get_prefix(guild).await.unwrap(), Some('$'));
    }

    #[test]
    fn clear_prefix_reports_removal() {
        let (_dir, store) = store();
        let admin = store.admin().unwrap();
        admin.set_prefix(&Prefix::new(1, '?')).unwrap();

        assert!(admin.clear_prefix(GuildId(1)).unwrap());
        assert!(!admin.clear_prefix(GuildId(1)).unwrap());
        assert_eq!(admin.get_prefix(GuildId(1)).unwrap(), None);
    }

    #[test]
    fn list_muted_skips_unmuted() {
        let (_dir, store) = store();
        let admin = store.admin().unwrap();
        admin.set_muted(&MutedUser::new(5, true)).unwrap();
        admin.set_muted(&MutedUser::new(4, false)).unwrap();

        assert_eq!(admin.list_muted().unwrap(), vec![MutedUser::new(5, true)]);
    }

    #[tokio::test]
    async fn poisoned_session_lock_is_reported() {
        let (_dir, store) = store();
        let session = SqliteSession {
            db: Arc::new(Mutex::new(store.admin().unwrap())),
            open_sessions: Arc::new(AtomicUsize::new(1)),
        };

        let db = Arc::clone(&session.db);
        let _ = std::thread::spawn(move || {
            let _guard = db.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();

        assert!(matches!(
            session.is_muted(UserId(1)).await,
            Err(StorageError::LockPoisoned)
        ));
        assert!(matches!(
            session.get_prefix(GuildId(1)).await,
            Err(StorageError::LockPoisoned)
        ));
    }

    #[tokio::test]
    async fn sessions_are_released_on_drop() {
        let (_dir, store) = store();
        let first = store.session().await.unwrap();
        let second = store.session().await.unwrap();
        assert_eq!(store.open_sessions(), 2);

        drop(first);
        assert_eq!(store.open_sessions(), 1);
        drop(second);
        assert_eq!(store.open_sessions(), 0);
    }
}
