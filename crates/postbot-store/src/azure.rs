//! History log backed by an Azure Storage append blob.
//!
//! Each log lives at `{container}/{key}.log`. Requests are signed with the
//! account's Shared Key; no Azure SDK is involved. Every request is re-signed
//! on retry since the signature covers `x-ms-date`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};

use crate::error::StoreError;
use crate::log::{normalize_entry, parse_entries, HistoryLog};
use crate::retry::retry_with_backoff;
use crate::signing::{CanonicalRequest, SharedKeySigner};

const API_VERSION: &str = "2021-08-06";

/// One append-only log stored as an Azure append blob.
pub struct AzureBlobLog {
    client: Client,
    signer: SharedKeySigner,
    base_url: String,
    container: String,
    key: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for AzureBlobLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobLog")
            .field("base_url", &self.base_url)
            .field("container", &self.container)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl AzureBlobLog {
    /// Opens the log `key` in `container` of the given storage account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for a malformed account key or
    /// [`StoreError::Http`] if the HTTP client cannot be built.
    pub fn new(
        account: &str,
        access_key: &str,
        container: &str,
        key: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let base_url = format!("https://{account}.blob.core.windows.net");
        Self::with_base_url(account, access_key, container, key, timeout_secs, &base_url)
    }

    /// Same as [`AzureBlobLog::new`] against a custom endpoint (wiremock, Azurite).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for a malformed account key or
    /// [`StoreError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        account: &str,
        access_key: &str,
        container: &str,
        key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postbot/0.1")
            .build()?;

        Ok(Self {
            client,
            signer: SharedKeySigner::new(account, access_key)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            container: container.to_owned(),
            key: key.to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retry on throttling, 5xx and connection errors: up to
    /// `max_retries` extra attempts, starting at `backoff_base_ms` and doubling.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    fn blob_path(&self) -> String {
        format!("/{}/{}.log", self.container, self.key)
    }

    async fn send(&self, request: &BlobRequest<'_>) -> Result<(StatusCode, String), StoreError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.send_once(request)
        })
        .await
    }

    /// One signed attempt. Throttling and 5xx come back as errors so the
    /// caller's back-off can retry them.
    async fn send_once(&self, req: &BlobRequest<'_>) -> Result<(StatusCode, String), StoreError> {
        let date = chrono::Utc::now()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();

        let mut ms_headers: Vec<(&str, String)> = vec![
            ("x-ms-date", date),
            ("x-ms-version", API_VERSION.to_owned()),
        ];
        ms_headers.extend(req.ms_headers.iter().map(|(k, v)| (*k, (*v).to_owned())));

        let authorization = self.signer.authorization(&CanonicalRequest {
            method: req.method.as_str(),
            content_length: req.body.len(),
            if_none_match: req.if_none_match,
            ms_headers: &ms_headers,
            path: req.path,
            query: req.query,
        })?;

        let mut request = self
            .client
            .request(req.method.clone(), format!("{}{}", self.base_url, req.path))
            .query(req.query)
            .header("Authorization", authorization);
        for (name, value) in &ms_headers {
            request = request.header(*name, value.as_str());
        }
        if let Some(value) = req.if_none_match {
            request = request.header("If-None-Match", value);
        }

        let response = request.body(req.body.to_vec()).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(StoreError::UnexpectedStatus {
                op: req.op,
                status: status.as_u16(),
                body: text,
            });
        }
        Ok((status, text))
    }

    async fn create_container(&self) -> Result<(), StoreError> {
        let path = format!("/{}", self.container);
        let (status, body) = self
            .send(&BlobRequest {
                query: &[("restype", "container")],
                ..BlobRequest::new("create container", Method::PUT, &path)
            })
            .await?;
        match status {
            StatusCode::CREATED | StatusCode::CONFLICT => Ok(()),
            other => Err(StoreError::UnexpectedStatus {
                op: "create container",
                status: other.as_u16(),
                body,
            }),
        }
    }

    async fn create_blob(&self) -> Result<(), StoreError> {
        let path = self.blob_path();
        let (status, body) = self
            .send(&BlobRequest {
                ms_headers: &[("x-ms-blob-type", "AppendBlob")],
                if_none_match: Some("*"),
                ..BlobRequest::new("create blob", Method::PUT, &path)
            })
            .await?;
        match status {
            StatusCode::CREATED => {
                tracing::info!(log = %self.key, container = %self.container, "created append blob");
                Ok(())
            }
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => Ok(()),
            other => Err(StoreError::UnexpectedStatus {
                op: "create blob",
                status: other.as_u16(),
                body,
            }),
        }
    }

    async fn append_block(&self, line: &str) -> Result<StatusCode, StoreError> {
        let path = self.blob_path();
        let payload = format!("{line}\n").into_bytes();
        let (status, body) = self
            .send(&BlobRequest {
                query: &[("comp", "appendblock")],
                body: &payload,
                ..BlobRequest::new("append block", Method::PUT, &path)
            })
            .await?;
        match status {
            StatusCode::CREATED | StatusCode::NOT_FOUND => Ok(status),
            other => Err(StoreError::UnexpectedStatus {
                op: "append block",
                status: other.as_u16(),
                body,
            }),
        }
    }
}

struct BlobRequest<'a> {
    op: &'static str,
    method: Method,
    path: &'a str,
    query: &'a [(&'a str, &'a str)],
    ms_headers: &'a [(&'static str, &'a str)],
    if_none_match: Option<&'a str>,
    body: &'a [u8],
}

impl<'a> BlobRequest<'a> {
    fn new(op: &'static str, method: Method, path: &'a str) -> Self {
        Self {
            op,
            method,
            path,
            query: &[],
            ms_headers: &[],
            if_none_match: None,
            body: &[],
        }
    }
}

#[async_trait]
impl HistoryLog for AzureBlobLog {
    fn key(&self) -> &str {
        &self.key
    }

    async fn ensure(&self) -> Result<(), StoreError> {
        self.create_container().await?;
        self.create_blob().await
    }

    async fn read_all(&self) -> Result<Vec<String>, StoreError> {
        let path = self.blob_path();
        let (status, body) = self
            .send(&BlobRequest::new("read blob", Method::GET, &path))
            .await?;
        match status {
            StatusCode::OK => Ok(parse_entries(&body)),
            StatusCode::NOT_FOUND => {
                tracing::debug!(log = %self.key, "blob not found, treating log as empty");
                Ok(Vec::new())
            }
            other => Err(StoreError::UnexpectedStatus {
                op: "read blob",
                status: other.as_u16(),
                body,
            }),
        }
    }

    async fn append(&self, entry: &str) -> Result<(), StoreError> {
        let line = normalize_entry(&self.key, entry)?;

        if self.append_block(&line).await? == StatusCode::NOT_FOUND {
            tracing::info!(log = %self.key, "append target missing, creating it");
            self.ensure().await?;
            let status = self.append_block(&line).await?;
            if status != StatusCode::CREATED {
                return Err(StoreError::UnexpectedStatus {
                    op: "append block",
                    status: status.as_u16(),
                    body: String::new(),
                });
            }
        }

        tracing::debug!(log = %self.key, entry = %line, "appended log entry");
        Ok(())
    }
}
