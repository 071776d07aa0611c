use async_trait::async_trait;
use postbot_core::single_line;

use crate::error::StoreError;

/// An ordered, append-only list of single-line entries.
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Name of the log, e.g. `news_log`.
    fn key(&self) -> &str;

    /// Create the backing container/blob or file if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend refuses the create.
    async fn ensure(&self) -> Result<(), StoreError>;

    /// All entries, oldest first. A log that was never written reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    async fn read_all(&self) -> Result<Vec<String>, StoreError>;

    /// Append one entry at the end of the log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyEntry`] for blank entries, or a backend error.
    async fn append(&self, entry: &str) -> Result<(), StoreError>;

    /// The last `k` entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    async fn recent(&self, k: usize) -> Result<Vec<String>, StoreError> {
        let mut all = self.read_all().await?;
        let skip = all.len().saturating_sub(k);
        Ok(all.split_off(skip))
    }
}

/// Collapse an entry onto a single line.
///
/// CR/LF become spaces and surrounding whitespace is trimmed, the same rule
/// [`postbot_core::sanitize_title`] applies before comparing.
///
/// # Errors
///
/// Returns [`StoreError::EmptyEntry`] when nothing is left after trimming.
pub fn normalize_entry(log: &str, entry: &str) -> Result<String, StoreError> {
    let line = single_line(entry);
    if line.is_empty() {
        return Err(StoreError::EmptyEntry {
            log: log.to_owned(),
        });
    }
    Ok(line)
}

/// Split stored log text into entries, skipping blank lines.
#[must_use]
pub fn parse_entries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
