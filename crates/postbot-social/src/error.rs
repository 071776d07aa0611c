use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tweet is {len} weighted characters, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("tweet text is empty")]
    Empty,

    #[error("X API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("signing failed: {0}")]
    Signing(String),
}
