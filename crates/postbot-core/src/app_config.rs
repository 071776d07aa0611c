use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// OAuth 1.0a user-context credentials for the Twitter/X API.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("access_secret", &"[redacted]")
            .finish()
    }
}

/// Shared Key credentials for the Azure Storage account holding the history logs.
#[derive(Clone)]
pub struct BlobCredentials {
    pub account: String,
    pub key: String,
}

impl std::fmt::Debug for BlobCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobCredentials")
            .field("account", &self.account)
            .field("key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub openai_api_key: String,
    pub twitter: Option<TwitterCredentials>,
    pub bing_search_api_key: Option<String>,
    pub blob: Option<BlobCredentials>,
    pub blob_container: String,
    /// Directory for file-backed history logs when no blob account is configured.
    pub log_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,
    pub http_backoff_base_ms: u64,
    pub tweet_max_attempts: u32,
    pub novelty_threshold: u8,
    pub history_window: usize,
    pub novelty_window: usize,
    pub term_window: usize,
    pub fact_fallback_probability: f64,
    pub news_query: String,
    pub news_count: usize,
    pub relevant_topics: Vec<String>,
    pub chat_model: String,
    pub novelty_model: String,
    pub creative_model: String,
    pub news_schedule: String,
    pub fact_schedule: String,
    pub stoic_schedule: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("openai_api_key", &"[redacted]")
            .field("twitter", &self.twitter)
            .field(
                "bing_search_api_key",
                &self.bing_search_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("blob", &self.blob)
            .field("blob_container", &self.blob_container)
            .field("log_dir", &self.log_dir)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_max_retries", &self.http_max_retries)
            .field("http_backoff_base_ms", &self.http_backoff_base_ms)
            .field("tweet_max_attempts", &self.tweet_max_attempts)
            .field("novelty_threshold", &self.novelty_threshold)
            .field("history_window", &self.history_window)
            .field("novelty_window", &self.novelty_window)
            .field("term_window", &self.term_window)
            .field("fact_fallback_probability", &self.fact_fallback_probability)
            .field("news_query", &self.news_query)
            .field("news_count", &self.news_count)
            .field("relevant_topics", &self.relevant_topics)
            .field("chat_model", &self.chat_model)
            .field("novelty_model", &self.novelty_model)
            .field("creative_model", &self.creative_model)
            .field("news_schedule", &self.news_schedule)
            .field("fact_schedule", &self.fact_schedule)
            .field("stoic_schedule", &self.stoic_schedule)
            .finish()
    }
}
