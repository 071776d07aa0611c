//! History log stored as a plain text file on local disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::StoreError;
use crate::log::{normalize_entry, parse_entries, HistoryLog};

/// One log at `{dir}/{key}.log`, one entry per line.
#[derive(Debug, Clone)]
pub struct FileLog {
    key: String,
    path: PathBuf,
}

impl FileLog {
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            key: key.to_owned(),
            path: dir.join(format!("{key}.log")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryLog for FileLog {
    fn key(&self) -> &str {
        &self.key
    }

    async fn ensure(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<String>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => Ok(parse_entries(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn append(&self, entry: &str) -> Result<(), StoreError> {
        let line = normalize_entry(&self.key, entry)?;
        self.ensure().await?;

        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(format!("{line}\n").as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(log = %self.key, path = %self.path.display(), "appended log entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::new(dir.path(), "news_log");
        assert!(log.read_all().await.unwrap().is_empty());
        assert!(!log.path().exists(), "reading must not create the file");
    }

    #[tokio::test]
    async fn append_creates_directory_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::new(&dir.path().join("nested"), "facts_log");

        log.append("bagging").await.unwrap();
        log.append("boosting\nensembles").await.unwrap();

        assert_eq!(
            log.read_all().await.unwrap(),
            vec!["bagging", "boosting ensembles"]
        );
        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw, "bagging\nboosting ensembles\n");
    }

    #[tokio::test]
    async fn recent_returns_tail() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::new(dir.path(), "news_log");
        for title in ["a", "b", "c", "d"] {
            log.append(title).await.unwrap();
        }
        assert_eq!(log.recent(2).await.unwrap(), vec!["c", "d"]);
        assert_eq!(log.recent(10).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn blank_entry_is_rejected_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::new(dir.path(), "tweets_log");
        let err = log.append("   ").await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyEntry { .. }));
        assert!(!log.path().exists());
    }

    #[tokio::test]
    async fn ensure_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::new(dir.path(), "stoic_quotes_log");
        log.append("first").await.unwrap();
        log.ensure().await.unwrap();
        assert_eq!(log.read_all().await.unwrap(), vec!["first"]);
    }
}
