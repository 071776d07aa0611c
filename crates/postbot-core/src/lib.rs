pub mod app_config;
pub mod config;
pub mod news;
pub mod term;

pub use app_config::{AppConfig, BlobCredentials, Environment, TwitterCredentials};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use news::{sanitize_title, single_line, NewsItem};
pub use term::{TermKind, NEWS_LOG, RAW_TWEETS_LOG};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
