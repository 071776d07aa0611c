//! HTTP client for the X (Twitter) v2 API.

use std::time::Duration;

use async_trait::async_trait;
use postbot_core::TwitterCredentials;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SocialError;
use crate::length::check_tweet_length;
use crate::oauth::authorization_header;
use crate::publisher::{PublishedTweet, Publisher};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

#[derive(Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
    #[serde(default)]
    text: Option<String>,
}

/// Posts tweets on behalf of one account.
pub struct TwitterClient {
    client: Client,
    credentials: TwitterCredentials,
    base_url: String,
}

impl TwitterClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(credentials: TwitterCredentials, timeout_secs: u64) -> Result<Self, SocialError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_base_url(
        credentials: TwitterCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SocialError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postbot/0.1")
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl Publisher for TwitterClient {
    async fn publish(&self, text: &str) -> Result<PublishedTweet, SocialError> {
        let len = check_tweet_length(text)?;

        let url = format!("{}/2/tweets", self.base_url);
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        let authorization =
            authorization_header(&self.credentials, "POST", &url, &nonce, timestamp)?;

        let response = self
            .client
            .post(&url)
            .header("Authorization", authorization)
            .json(&CreateTweetRequest { text })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "tweet rejected");
            return Err(SocialError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CreateTweetResponse =
            serde_json::from_str(&body).map_err(|e| SocialError::Deserialize {
                context: "create tweet response".to_owned(),
                source: e,
            })?;

        tracing::info!(tweet_id = %parsed.data.id, len, "tweet published");
        Ok(PublishedTweet {
            id: parsed.data.id,
            text: parsed.data.text.unwrap_or_else(|| text.to_owned()),
        })
    }
}
