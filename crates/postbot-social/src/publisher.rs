use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SocialError;

/// A tweet that was accepted by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedTweet {
    pub id: String,
    pub text: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Post `text` as a new tweet.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::TooLong`] before any network call when the text
    /// exceeds the limit, or an API/transport error.
    async fn publish(&self, text: &str) -> Result<PublishedTweet, SocialError>;
}
