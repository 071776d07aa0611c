use thiserror::Error;

/// Errors returned by the chat-completion client and reply parsers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("chat API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered successfully but without any message content.
    #[error("chat API returned no content for model {model}")]
    EmptyResponse { model: String },

    /// The model's reply did not have the shape the prompt asked for.
    #[error("malformed model reply for {context}: {raw:?}")]
    Malformed { context: String, raw: String },
}
