use postbot_social::{check_tweet_length, PublishedTweet};
use postbot_store::HistoryLog;

use crate::error::PipelineError;
use crate::settings::Services;

/// Publish `text` verbatim and record it in `log`.
///
/// # Errors
///
/// Returns [`PipelineError::Social`] if the text does not fit or publishing
/// fails; nothing is appended in that case. A failed append after publishing
/// is only logged.
pub async fn publish_raw(
    services: Services<'_>,
    text: &str,
    log: &dyn HistoryLog,
) -> Result<PublishedTweet, PipelineError> {
    let len = check_tweet_length(text)?;
    let tweet = services.publisher.publish(text).await?;
    if let Err(e) = log.append(text).await {
        tracing::error!(tweet_id = %tweet.id, log = log.key(), error = %e, "raw tweet is live but was not recorded");
    }
    tracing::info!(tweet_id = %tweet.id, len, log = log.key(), "raw tweet published");
    Ok(tweet)
}

#[cfg(test)]
mod tests {
    use postbot_social::SocialError;
    use postbot_store::MemoryLog;

    use super::*;
    use crate::testing::{settings, AppendFailingLog, RecordingPublisher, ScriptedModel};

    #[tokio::test]
    async fn publishes_verbatim_and_logs() {
        let llm = ScriptedModel::default();
        let publisher = RecordingPublisher::default();
        let settings = settings();
        let services = Services { llm: &llm, publisher: &publisher, settings: &settings };
        let log = MemoryLog::new("tweets_log");

        let tweet = publish_raw(services, "Shipping v1 today! \"quoted\"", &log)
            .await
            .unwrap();

        assert_eq!(tweet.text, "Shipping v1 today! \"quoted\"");
        assert_eq!(log.entries().await, vec!["Shipping v1 today! \"quoted\""]);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn too_long_is_rejected_before_publishing() {
        let llm = ScriptedModel::default();
        let publisher = RecordingPublisher::default();
        let settings = settings();
        let services = Services { llm: &llm, publisher: &publisher, settings: &settings };
        let log = MemoryLog::new("tweets_log");

        let err = publish_raw(services, &"a".repeat(281), &log).await.unwrap_err();

        assert!(matches!(err, PipelineError::Social(SocialError::TooLong { len: 281, max: 280 })));
        assert!(publisher.published().is_empty());
        assert!(log.entries().await.is_empty());
    }

    #[tokio::test]
    async fn failed_append_still_returns_the_tweet() {
        let llm = ScriptedModel::default();
        let publisher = RecordingPublisher::default();
        let settings = settings();
        let services = Services { llm: &llm, publisher: &publisher, settings: &settings };
        let log = AppendFailingLog::new("tweets_log");

        let tweet = publish_raw(services, "Hello", &log).await.unwrap();

        assert_eq!(tweet.text, "Hello");
        assert_eq!(log.attempts(), 1);
    }
}
