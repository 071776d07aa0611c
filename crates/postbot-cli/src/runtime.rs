//! Wiring from `AppConfig` to the concrete clients a job needs.

use std::sync::Arc;

use anyhow::Context;
use postbot_core::{AppConfig, Environment};
use postbot_llm::{ChatModel, OpenAiClient};
use postbot_pipeline::{PipelineSettings, Services};
use postbot_social::{DryRunPublisher, Publisher, TwitterClient};
use postbot_store::{AzureBlobLog, FileLog, HistoryLog, MemoryLog};

pub(crate) struct Runtime {
    pub(crate) config: Arc<AppConfig>,
    llm: Arc<dyn ChatModel>,
    publisher: Arc<dyn Publisher>,
    settings: PipelineSettings,
    dry_run: bool,
}

impl Runtime {
    /// Build the clients for one run.
    ///
    /// In dry-run mode nothing is posted, so Twitter credentials are optional.
    /// The `test` environment only allows dry runs.
    pub(crate) fn new(config: Arc<AppConfig>, dry_run: bool) -> anyhow::Result<Self> {
        if config.env == Environment::Test && !dry_run {
            anyhow::bail!("POSTBOT_ENV=test only allows --dry-run");
        }

        let llm = OpenAiClient::new(&config.openai_api_key, config.http_timeout_secs)
            .context("failed to build OpenAI client")?
            .with_retry(config.http_max_retries, config.http_backoff_base_ms);

        let publisher: Arc<dyn Publisher> = if dry_run {
            Arc::new(DryRunPublisher)
        } else {
            let credentials = config.twitter.clone().ok_or_else(|| {
                anyhow::anyhow!("TWITTER_* credentials are not set; pass --dry-run to preview")
            })?;
            Arc::new(
                TwitterClient::new(credentials, config.http_timeout_secs)
                    .context("failed to build Twitter client")?,
            )
        };

        Ok(Self {
            settings: PipelineSettings::from_config(&config),
            config,
            llm: Arc::new(llm),
            publisher,
            dry_run,
        })
    }

    pub(crate) fn services(&self) -> Services<'_> {
        Services {
            llm: self.llm.as_ref(),
            publisher: self.publisher.as_ref(),
            settings: &self.settings,
        }
    }

    /// Open the history log `key`.
    ///
    /// Dry runs get an in-memory copy seeded from the real log, so appends
    /// never reach storage.
    pub(crate) async fn open_log(&self, key: &str) -> anyhow::Result<Box<dyn HistoryLog>> {
        let durable = open_durable_log(&self.config, key)?;
        if !self.dry_run {
            return Ok(durable);
        }
        let entries = durable
            .read_all()
            .await
            .with_context(|| format!("failed to read {key}"))?;
        tracing::info!(log = key, entries = entries.len(), "dry run, history kept in memory");
        Ok(Box::new(MemoryLog::seeded(key, entries)))
    }
}

/// Azure append blob when storage credentials are configured, else a local file.
pub(crate) fn open_durable_log(
    config: &AppConfig,
    key: &str,
) -> anyhow::Result<Box<dyn HistoryLog>> {
    match &config.blob {
        Some(blob) => {
            let log = AzureBlobLog::new(
                &blob.account,
                &blob.key,
                &config.blob_container,
                key,
                config.http_timeout_secs,
            )
            .with_context(|| format!("failed to open blob log {key}"))?
            .with_retry(config.http_max_retries, config.http_backoff_base_ms);
            Ok(Box::new(log))
        }
        None => Ok(Box::new(FileLog::new(&config.log_dir, key))),
    }
}
