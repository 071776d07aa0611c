//! Hacker News (Firebase API) front-page client.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use postbot_core::NewsItem;
use reqwest::Client;
use serde::Deserialize;

use crate::error::NewsError;
use crate::NewsSource;

const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com";
const MIN_SCORE: i64 = 100;
const MIN_TITLE_CHARS: usize = 25;

#[derive(Debug, Deserialize)]
struct HnItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    dead: bool,
    #[serde(default)]
    deleted: bool,
}

impl HnItem {
    fn into_news_item(self) -> Option<NewsItem> {
        if self.dead || self.deleted || self.score.unwrap_or(0) <= MIN_SCORE {
            return None;
        }
        let title = self.title?;
        if title.chars().count() <= MIN_TITLE_CHARS {
            return None;
        }
        let url = self
            .url
            .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", self.id));
        Some(NewsItem {
            title,
            description: String::new(),
            url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    client: Client,
    base_url: String,
}

impl HackerNewsClient {
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, NewsError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postbot/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, NewsError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NewsError::Api {
                source_name: "hackernews",
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| NewsError::Deserialize {
            context: format!("hacker news {path}"),
            source: e,
        })
    }

    /// Popular stories among the first `limit` top-story ids.
    ///
    /// Keeps stories scoring above 100 with titles longer than 25 characters.
    /// Individual item failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError`] if the top-stories list itself cannot be fetched.
    pub async fn top_stories(&self, limit: usize) -> Result<Vec<NewsItem>, NewsError> {
        let ids: Vec<u64> = self.get_json("/v0/topstories.json").await?;

        let fetches = ids.into_iter().take(limit).map(|id| async move {
            let path = format!("/v0/item/{id}.json");
            (id, self.get_json::<Option<HnItem>>(&path).await)
        });

        let mut stories = Vec::new();
        for (id, result) in join_all(fetches).await {
            match result {
                Ok(Some(item)) => stories.extend(item.into_news_item()),
                Ok(None) => tracing::debug!(id, "hacker news item is null"),
                Err(e) => tracing::warn!(id, error = %e, "failed to fetch hacker news item"),
            }
        }

        tracing::info!(count = stories.len(), limit, "hacker news stories selected");
        Ok(stories)
    }
}

#[async_trait]
impl NewsSource for HackerNewsClient {
    fn name(&self) -> &'static str {
        "hackernews"
    }

    async fn fetch(&self, count: usize) -> Result<Vec<NewsItem>, NewsError> {
        self.top_stories(count).await
    }
}
