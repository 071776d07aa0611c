//! Turn a news item into a published tweet.

use postbot_core::NewsItem;
use postbot_llm::clean_tweet;
use postbot_llm::templates::news_tweet_prompt;
use postbot_social::{check_tweet_length, PublishedTweet, SocialError};

use crate::error::PipelineError;
use crate::settings::Services;

/// Generate a tweet for `item` and publish the first one that fits.
///
/// Generation is retried up to `tweet_max_attempts` times while the result is
/// too long or empty.
///
/// # Errors
///
/// Returns [`PipelineError::TweetTooLong`] when no attempt fits, or the
/// model/publisher error.
pub async fn compose_news_tweet(
    services: Services<'_>,
    item: &NewsItem,
) -> Result<PublishedTweet, PipelineError> {
    let settings = services.settings;
    let prompt = news_tweet_prompt(&settings.models.creative, item);
    let mut last_len = 0;

    for attempt in 1..=settings.tweet_max_attempts {
        let tweet = clean_tweet(&services.llm.complete(&prompt).await?);
        match check_tweet_length(&tweet) {
            Ok(len) => {
                tracing::info!(title = %item.title, attempt, len, "news tweet composed");
                return Ok(services.publisher.publish(&tweet).await?);
            }
            Err(SocialError::TooLong { len, max }) => {
                tracing::warn!(title = %item.title, attempt, len, max, "news tweet too long, regenerating");
                last_len = len;
            }
            Err(SocialError::Empty) => {
                tracing::warn!(title = %item.title, attempt, "news tweet empty, regenerating");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(PipelineError::TweetTooLong {
        attempts: settings.tweet_max_attempts,
        last_len,
    })
}
