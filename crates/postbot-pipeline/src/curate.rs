//! News curation run.

use postbot_core::{sanitize_title, NewsItem, TermKind};
use postbot_llm::parse_relevance;
use postbot_llm::templates::relevance_prompt;
use postbot_social::PublishedTweet;
use postbot_store::HistoryLog;

use crate::compose::compose_news_tweet;
use crate::error::PipelineError;
use crate::gate::{NoveltyGate, Verdict};
use crate::settings::Services;
use crate::term::{run_term_tweet, TermOutcome};

/// The news item that was published in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPost {
    pub title: String,
    pub tweet: PublishedTweet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurationOutcome {
    pub published: Option<NewsPost>,
    pub relevant: usize,
    pub skipped_duplicates: usize,
    pub skipped_overlapping: usize,
    pub failed: usize,
    /// Set when no candidate was relevant and the fact fallback ran.
    pub fallback: Option<TermOutcome>,
}

/// Pick at most one candidate worth posting and publish it.
///
/// 1. Read the news history window.
/// 2. Filter candidates by relevance (one model call for the whole batch).
/// 3. Walk relevant candidates in order through the novelty gate until one
///    is published. Overlapping titles are appended so they are not scored
///    again; failed publishes move on to the next candidate. A history
///    append that fails after publishing is logged, not returned.
/// 4. With nothing relevant, maybe post a fact tweet instead.
///
/// # Errors
///
/// Returns [`PipelineError`] if the history cannot be read or written, the
/// relevance reply is malformed, or a novelty model call fails.
pub async fn run_news_curation(
    services: Services<'_>,
    candidates: &[NewsItem],
    news_log: &dyn HistoryLog,
    facts_log: &dyn HistoryLog,
) -> Result<CurationOutcome, PipelineError> {
    let settings = services.settings;
    let mut outcome = CurationOutcome::default();

    let mut history = news_log.recent(settings.history_window).await?;
    let relevant = filter_relevant(services, candidates).await?;
    outcome.relevant = relevant.len();
    tracing::info!(
        candidates = candidates.len(),
        relevant = relevant.len(),
        "relevance filter done"
    );

    if relevant.is_empty() {
        if rand::random::<f64>() < settings.fact_fallback_probability {
            tracing::info!("no relevant news, posting a fact instead");
            outcome.fallback = Some(run_term_tweet(services, TermKind::Fact, facts_log).await?);
        } else {
            tracing::info!("no relevant news, nothing posted");
        }
        return Ok(outcome);
    }

    let gate = NoveltyGate::new(
        &settings.models.novelty,
        settings.novelty_threshold,
        settings.novelty_window,
    );

    for candidate in relevant {
        let title = sanitize_title(&candidate.title);
        if title.is_empty() {
            continue;
        }

        match gate.assess(services.llm, &title, &history).await? {
            Verdict::AlreadyPosted => outcome.skipped_duplicates += 1,
            Verdict::Overlapping { .. } => {
                news_log.append(&title).await?;
                history.push(title);
                outcome.skipped_overlapping += 1;
            }
            Verdict::Novel { .. } => {
                let item = NewsItem {
                    title: title.clone(),
                    description: candidate.description.clone(),
                    url: candidate.url.clone(),
                };
                match compose_news_tweet(services, &item).await {
                    Ok(tweet) => {
                        if let Err(e) = news_log.append(&title).await {
                            tracing::error!(
                                title = %title,
                                tweet_id = %tweet.id,
                                error = %e,
                                "news is live but was not recorded in history"
                            );
                        }
                        tracing::info!(title = %title, tweet_id = %tweet.id, "news published");
                        outcome.published = Some(NewsPost { title, tweet });
                        break;
                    }
                    Err(e) => {
                        tracing::error!(title = %title, error = %e, "failed to publish news, trying next");
                        outcome.failed += 1;
                    }
                }
            }
        }
    }

    Ok(outcome)
}

async fn filter_relevant<'c>(
    services: Services<'_>,
    candidates: &'c [NewsItem],
) -> Result<Vec<&'c NewsItem>, PipelineError> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let settings = services.settings;
    let titles: Vec<String> = candidates.iter().map(|c| c.title.clone()).collect();
    let prompt = relevance_prompt(&settings.models.chat, &titles, &settings.relevant_topics);
    let reply = services.llm.complete(&prompt).await?;
    let flags = parse_relevance(&reply, candidates.len())?;

    Ok(candidates
        .iter()
        .zip(flags)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect())
}
