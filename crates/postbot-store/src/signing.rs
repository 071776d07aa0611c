//! Azure Storage Shared Key request signing.
//!
//! Builds the canonical string-to-sign for the Blob service and signs it with
//! HMAC-SHA256 using the base64-decoded account key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// The request fields that take part in the signature.
pub(crate) struct CanonicalRequest<'a> {
    pub method: &'a str,
    pub content_length: usize,
    pub if_none_match: Option<&'a str>,
    /// `x-ms-*` headers; names must already be lowercase.
    pub ms_headers: &'a [(&'a str, String)],
    /// Resource path, e.g. `/botdata/news_log.log`.
    pub path: &'a str,
    pub query: &'a [(&'a str, &'a str)],
}

pub(crate) struct SharedKeySigner {
    account: String,
    key: Vec<u8>,
}

impl SharedKeySigner {
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if `access_key` is not valid base64.
    pub(crate) fn new(account: &str, access_key: &str) -> Result<Self, StoreError> {
        let key = STANDARD
            .decode(access_key.trim())
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;
        Ok(Self {
            account: account.to_owned(),
            key,
        })
    }

    pub(crate) fn string_to_sign(&self, req: &CanonicalRequest<'_>) -> String {
        let content_length = if req.content_length == 0 {
            String::new()
        } else {
            req.content_length.to_string()
        };

        // VERB, Content-Encoding, Content-Language, Content-Length, Content-MD5,
        // Content-Type, Date, If-Modified-Since, If-Match, If-None-Match,
        // If-Unmodified-Since, Range
        let standard = [
            req.method,
            "",
            "",
            content_length.as_str(),
            "",
            "",
            "",
            "",
            "",
            req.if_none_match.unwrap_or(""),
            "",
            "",
        ];

        let mut out = String::new();
        for value in standard {
            out.push_str(value);
            out.push('\n');
        }

        let mut headers: Vec<&(&str, String)> = req.ms_headers.iter().collect();
        headers.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in headers {
            out.push_str(name);
            out.push(':');
            out.push_str(value.trim());
            out.push('\n');
        }

        out.push('/');
        out.push_str(&self.account);
        out.push_str(req.path);

        let mut query: Vec<(String, &str)> = req
            .query
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), *v))
            .collect();
        query.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in query {
            out.push('\n');
            out.push_str(&name);
            out.push(':');
            out.push_str(value);
        }

        out
    }

    /// Value for the `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if the key cannot seed the MAC.
    pub(crate) fn authorization(&self, req: &CanonicalRequest<'_>) -> Result<String, StoreError> {
        let string_to_sign = self.string_to_sign(req);
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| StoreError::InvalidKey(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        Ok(format!("SharedKey {}:{signature}", self.account))
    }
}
