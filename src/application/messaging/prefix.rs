//! Prefix resolver - Active command prefix of a guild

use crate::application::errors::StorageError;
use crate::domain::entities::{GuildId, DEFAULT_PREFIX};
use crate::domain::traits::ConfigSession;

#[derive(Debug, Clone, Copy)]
pub struct PrefixResolver {
    default: char,
}

impl PrefixResolver {
    pub fn new(default: char) -> Self {
        Self { default }
    }

    /// Stored prefix of the guild, or the process-wide default
    pub async fn resolve(
        &self,
        session: &dyn ConfigSession,
        guild_id: GuildId,
    ) -> Result<char, StorageError> {
        let symbol = session.get_prefix(guild_id).await?.unwrap_or(self.default);
        tracing::debug!("Guild {} uses prefix '{}'", guild_id, symbol);
        Ok(symbol)
    }
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Prefix;
    use crate::domain::traits::ConfigStore;
    use crate::infrastructure::storage::MemoryStore;

    #[tokio::test]
    async fn falls_back_to_default_and_stays_stable() {
        let store = MemoryStore::new();
        let session = store.session().await.unwrap();
        let resolver = PrefixResolver::default();

        for _ in 0..3 {
            assert_eq!(resolver.resolve(session.as_ref(), GuildId(8)).await.unwrap(), '!');
        }
    }

    #[tokio::test]
    async fn stored_symbol_wins() {
        let store = MemoryStore::new();
        store.set_prefix(Prefix::new(8, '?')).await;
        let session = store.session().await.unwrap();

        let resolver = PrefixResolver::new('$');
        assert_eq!(resolver.resolve(session.as_ref(), GuildId(8)).await.unwrap(), '?');
        assert_eq!(resolver.resolve(session.as_ref(), GuildId(9)).await.unwrap(), '$');
    }
}
