//! Bing News Search v7 client.

use std::time::Duration;

use async_trait::async_trait;
use postbot_core::NewsItem;
use reqwest::Client;
use serde::Deserialize;

use crate::error::NewsError;
use crate::NewsSource;

const DEFAULT_BASE_URL: &str = "https://api.bing.microsoft.com";
const MARKET: &str = "en-US";

#[derive(Deserialize)]
struct NewsAnswer {
    #[serde(default)]
    value: Vec<NewsArticle>,
}

#[derive(Deserialize)]
struct NewsArticle {
    name: String,
    #[serde(default)]
    description: String,
    url: String,
}

pub struct BingNewsClient {
    client: Client,
    api_key: String,
    base_url: String,
    query: String,
}

impl std::fmt::Debug for BingNewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BingNewsClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl BingNewsClient {
    /// Creates a client for the production endpoint that searches `query`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, query: &str, timeout_secs: u64) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, query, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_base_url(
        api_key: &str,
        query: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postbot/0.1")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            query: query.to_owned(),
        })
    }

    /// Search Bing News for `query` and return at most `count` stories.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Api`] for a non-success status,
    /// [`NewsError::Deserialize`] for an unexpected body, or
    /// [`NewsError::Http`] on transport failure.
    pub async fn search(&self, query: &str, count: usize) -> Result<Vec<NewsItem>, NewsError> {
        let url = format!("{}/v7.0/news/search", self.base_url);
        let count_param = count.to_string();
        tracing::debug!(query, count, "bing news search");

        let response = self
            .client
            .get(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .query(&[("q", query), ("mkt", MARKET), ("count", count_param.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NewsError::Api {
                source_name: "bing",
                status: status.as_u16(),
                body,
            });
        }

        let answer: NewsAnswer =
            serde_json::from_str(&body).map_err(|e| NewsError::Deserialize {
                context: format!("bing news search (q={query})"),
                source: e,
            })?;

        Ok(answer
            .value
            .into_iter()
            .take(count)
            .map(|a| NewsItem {
                title: a.name,
                description: a.description,
                url: a.url,
            })
            .collect())
    }
}

#[async_trait]
impl NewsSource for BingNewsClient {
    fn name(&self) -> &'static str {
        "bing"
    }

    async fn fetch(&self, count: usize) -> Result<Vec<NewsItem>, NewsError> {
        self.search(&self.query, count).await
    }
}
