//! Wikipedia client over the MediaWiki opensearch API

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::domain::traits::{WikiPage, WikiSearch};

/// opensearch answers `[query, [titles], [descriptions], [links]]`
type OpenSearchResponse = (String, Vec<String>, Vec<String>, Vec<String>);

pub struct WikipediaClient {
    client: Client,
    endpoint: String,
}

impl WikipediaClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, BotError> {
        let client = Client::builder()
            .user_agent(concat!("simpbot/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn first_page(response: OpenSearchResponse) -> Option<WikiPage> {
        let (_query, titles, _descriptions, links) = response;
        let title = titles.into_iter().next()?;
        let link = links.into_iter().next()?;
        Some(WikiPage { title, link })
    }
}

#[async_trait]
impl WikiSearch for WikipediaClient {
    async fn search_page(&self, query: &str) -> Result<Option<WikiPage>, BotError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Wikipedia API error: {}",
                response.status()
            )));
        }

        let data: OpenSearchResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(Self::first_page(data))
    }
}
