//! Fact and stoic-quote tweets.

use postbot_core::{single_line, TermKind};
use postbot_llm::templates::{term_prompt, term_tweet_prompt};
use postbot_llm::{clean_term, clean_tweet};
use postbot_social::{check_tweet_length, PublishedTweet, SocialError};
use postbot_store::HistoryLog;

use crate::error::PipelineError;
use crate::settings::Services;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOutcome {
    /// Tweet published and the term appended to its log.
    Published { term: String, tweet: PublishedTweet },
    /// The model proposed a term that was already used.
    Duplicate { term: String },
    /// No generated tweet fitted within the attempt budget.
    TooLong { term: String, attempts: u32 },
}

/// Generate a new term of `kind`, tweet about it, and record it in `log`.
///
/// The last `term_window` entries of the log seed the prompt. A term already
/// present anywhere in the log (case-insensitive) is not posted. Once the
/// tweet is live a failed append is logged and the published outcome is
/// still returned.
///
/// # Errors
///
/// Returns [`PipelineError`] on model, publisher or log-read failures, or
/// [`PipelineError::EmptyTerm`] if the model returns nothing usable.
pub async fn run_term_tweet(
    services: Services<'_>,
    kind: TermKind,
    log: &dyn HistoryLog,
) -> Result<TermOutcome, PipelineError> {
    let settings = services.settings;
    let model = settings.models.creative.as_str();

    let history = log.read_all().await?;
    let skip = history.len().saturating_sub(settings.term_window);
    let recent = &history[skip..];

    let term = single_line(&clean_term(
        &services
            .llm
            .complete(&term_prompt(model, kind, recent))
            .await?,
    ));
    if term.is_empty() {
        return Err(PipelineError::EmptyTerm { kind });
    }

    if history
        .iter()
        .any(|entry| entry.trim().eq_ignore_ascii_case(&term))
    {
        tracing::info!(%kind, term = %term, "term already used, nothing posted");
        return Ok(TermOutcome::Duplicate { term });
    }

    let prompt = term_tweet_prompt(model, kind, &term);
    for attempt in 1..=settings.tweet_max_attempts {
        let tweet = clean_tweet(&services.llm.complete(&prompt).await?);
        match check_tweet_length(&tweet) {
            Ok(len) => {
                let published = services.publisher.publish(&tweet).await?;
                if let Err(e) = log.append(&term).await {
                    tracing::error!(
                        %kind,
                        term = %term,
                        tweet_id = %published.id,
                        error = %e,
                        "term tweet is live but was not recorded in history"
                    );
                }
                tracing::info!(%kind, term = %term, attempt, len, tweet_id = %published.id, "term tweet published");
                return Ok(TermOutcome::Published {
                    term,
                    tweet: published,
                });
            }
            Err(SocialError::TooLong { len, .. }) => {
                tracing::warn!(%kind, term = %term, attempt, len, "term tweet too long, regenerating");
            }
            Err(SocialError::Empty) => {
                tracing::warn!(%kind, term = %term, attempt, "term tweet empty, regenerating");
            }
            Err(other) => return Err(other.into()),
        }
    }

    tracing::warn!(%kind, term = %term, attempts = settings.tweet_max_attempts, "no term tweet fitted");
    Ok(TermOutcome::TooLong {
        term,
        attempts: settings.tweet_max_attempts,
    })
}
