//! Weighted tweet length.
//!
//! X wraps every link in a t.co URL, so a link costs a fixed number of
//! characters regardless of its real length.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SocialError;

pub const MAX_TWEET_LENGTH: usize = 280;
pub const URL_LENGTH: usize = 23;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Length of `text` as X counts it: one per char, [`URL_LENGTH`] per link.
#[must_use]
pub fn weighted_length(text: &str) -> usize {
    let mut len = text.chars().count();
    for link in URL_RE.find_iter(text) {
        len = len - link.as_str().chars().count() + URL_LENGTH;
    }
    len
}

/// Returns the weighted length if `text` fits in a tweet.
///
/// # Errors
///
/// Returns [`SocialError::Empty`] for blank text and [`SocialError::TooLong`]
/// above [`MAX_TWEET_LENGTH`].
pub fn check_tweet_length(text: &str) -> Result<usize, SocialError> {
    if text.trim().is_empty() {
        return Err(SocialError::Empty);
    }
    let len = weighted_length(text);
    if len > MAX_TWEET_LENGTH {
        return Err(SocialError::TooLong {
            len,
            max: MAX_TWEET_LENGTH,
        });
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_counts_chars() {
        assert_eq!(weighted_length("hello world"), 11);
        assert_eq!(weighted_length("caf\u{e9}"), 4);
    }

    #[test]
    fn links_count_as_fixed_length() {
        let text = "Read this https://example.com/a/very/long/path/that/keeps/going?x=1 now";
        assert_eq!(weighted_length(text), "Read this ".len() + URL_LENGTH + " now".len());
        assert_eq!(weighted_length("http://a.io"), URL_LENGTH);
    }

    #[test]
    fn exactly_at_limit_is_accepted() {
        let text = "a".repeat(MAX_TWEET_LENGTH);
        assert_eq!(check_tweet_length(&text).unwrap(), MAX_TWEET_LENGTH);
    }

    #[test]
    fn one_over_limit_is_rejected() {
        let text = "a".repeat(MAX_TWEET_LENGTH + 1);
        match check_tweet_length(&text) {
            Err(SocialError::TooLong { len, max }) => {
                assert_eq!(len, 281);
                assert_eq!(max, 280);
            }
            other => panic!("expected TooLong, got {other:?}"),
        }
    }

    #[test]
    fn long_url_does_not_push_over_limit() {
        let url = format!("https://example.com/{}", "x".repeat(300));
        let text = format!("{} {url}", "a".repeat(250));
        assert_eq!(check_tweet_length(&text).unwrap(), 250 + 1 + URL_LENGTH);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(check_tweet_length("  \n"), Err(SocialError::Empty)));
    }
}
