//! In-process history log used for dry runs and tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::log::{normalize_entry, HistoryLog};

/// A log held in memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    key: String,
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self::seeded(key, Vec::new())
    }

    /// A log that starts out holding `entries`, oldest first.
    #[must_use]
    pub fn seeded(key: &str, entries: Vec<String>) -> Self {
        Self {
            key: key.to_owned(),
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Snapshot of the current entries.
    pub async fn entries(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl HistoryLog for MemoryLog {
    fn key(&self) -> &str {
        &self.key
    }

    async fn ensure(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn append(&self, entry: &str) -> Result<(), StoreError> {
        let line = normalize_entry(&self.key, entry)?;
        self.entries.lock().await.push(line);
        Ok(())
    }
}
