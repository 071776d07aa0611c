use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage account key: {0}")]
    InvalidKey(String),

    #[error("blob storage {op} returned status {status}: {body}")]
    UnexpectedStatus {
        op: &'static str,
        status: u16,
        body: String,
    },

    #[error("refusing to append an empty entry to {log}")]
    EmptyEntry { log: String },
}
