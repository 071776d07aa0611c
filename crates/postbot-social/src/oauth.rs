//! OAuth 1.0a user-context signing (HMAC-SHA1).
//!
//! JSON request bodies do not take part in the signature, so only the
//! `oauth_*` parameters and any query parameters are signed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use postbot_core::TwitterCredentials;
use sha1::Sha1;

use crate::error::SocialError;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is; everything else is encoded.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, ENCODE_SET).to_string()
}

pub(crate) fn signature_base(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

pub(crate) fn sign(
    base: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, SocialError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| SocialError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization: OAuth ...` header value for one request.
pub(crate) fn authorization_header(
    creds: &TwitterCredentials,
    method: &str,
    url: &str,
    nonce: &str,
    timestamp: i64,
) -> Result<String, SocialError> {
    let timestamp = timestamp.to_string();
    let mut params = vec![
        ("oauth_consumer_key", creds.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", creds.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base(method, url, &params);
    let signature = sign(&base, &creds.consumer_secret, &creds.access_secret)?;
    params.push(("oauth_signature", signature.as_str()));
    params.sort_by(|a, b| a.0.cmp(b.0));

    let fields = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}
