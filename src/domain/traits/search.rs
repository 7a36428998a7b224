use async_trait::async_trait;
use crate::application::errors::BotError;

/// Wiki lookup capability used by the `wiki` command
#[async_trait]
pub trait WikiSearch: Send + Sync {
    /// Best matching page for the query, if any
    async fn search_page(&self, query: &str) -> Result<Option<WikiPage>, BotError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
    pub link: String,
}
