//! HTTP client for the OpenAI chat-completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::LlmError;
use crate::prompt::{ChatModel, Prompt};
use crate::retry::retry_with_backoff;
use crate::types::{ChatRequest, ChatResponse};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat-completions endpoint.
///
/// Use [`OpenAiClient::new`] for production or [`OpenAiClient::with_base_url`]
/// to point at a mock server in tests. Transient failures are retried with
/// back-off; see [`OpenAiClient::with_retry`].
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl OpenAiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postbot/0.1")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retry on transient errors: up to `max_retries` extra attempts,
    /// starting at `backoff_base_ms` and doubling.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    async fn chat_once(&self, request: &ChatRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = request.model, "chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: format!("chat completion (model={})", request.model),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyResponse {
                model: request.model.to_owned(),
            })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let request = ChatRequest::from_prompt(prompt);
        let reply = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.chat_once(&request)
        })
        .await?;
        tracing::debug!(model = %prompt.model, reply = %reply, "chat completion reply");
        Ok(reply)
    }
}
