use async_trait::async_trait;

use crate::error::SocialError;
use crate::length::check_tweet_length;
use crate::publisher::{PublishedTweet, Publisher};

/// Logs the tweet instead of posting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPublisher;

#[async_trait]
impl Publisher for DryRunPublisher {
    async fn publish(&self, text: &str) -> Result<PublishedTweet, SocialError> {
        let len = check_tweet_length(text)?;
        let id = format!("dry-run-{}", uuid::Uuid::new_v4().simple());
        tracing::info!(tweet_id = %id, len, text = %text, "dry run, tweet not posted");
        Ok(PublishedTweet {
            id,
            text: text.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_synthetic_id_and_text() {
        let tweet = DryRunPublisher.publish("Hello #rustlang").await.unwrap();
        assert!(tweet.id.starts_with("dry-run-"));
        assert_eq!(tweet.text, "Hello #rustlang");
    }

    #[tokio::test]
    async fn still_enforces_length() {
        let err = DryRunPublisher.publish(&"x".repeat(300)).await.unwrap_err();
        assert!(matches!(err, SocialError::TooLong { len: 300, max: 280 }));
    }
}
