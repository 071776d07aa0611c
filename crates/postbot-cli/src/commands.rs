//! Handlers for the one-shot subcommands.

use anyhow::Context;
use postbot_core::{AppConfig, NewsItem, TermKind, NEWS_LOG, RAW_TWEETS_LOG};
use postbot_news::{BingNewsClient, HackerNewsClient, NewsSource};
use postbot_pipeline::{
    compose_news_tweet, publish_raw, run_news_curation, run_term_tweet, TermOutcome,
};
use postbot_store::HistoryLog;

use crate::runtime::{open_durable_log, Runtime};
use crate::NewsSourceArg;

fn news_source(
    config: &AppConfig,
    source: NewsSourceArg,
) -> anyhow::Result<Box<dyn NewsSource>> {
    match source {
        NewsSourceArg::Bing => {
            let api_key = config.bing_search_api_key.as_deref().ok_or_else(|| {
                anyhow::anyhow!("BING_SEARCH_API_KEY is not set; cannot search Bing News")
            })?;
            let client =
                BingNewsClient::new(api_key, &config.news_query, config.http_timeout_secs)
                    .context("failed to build Bing News client")?;
            Ok(Box::new(client))
        }
        NewsSourceArg::Hackernews => {
            let client = HackerNewsClient::new(config.http_timeout_secs)
                .context("failed to build Hacker News client")?;
            Ok(Box::new(client))
        }
    }
}

/// One curation pass: fetch candidates, filter, gate, publish at most one.
pub(crate) async fn run_news(runtime: &Runtime, source: NewsSourceArg) -> anyhow::Result<()> {
    let config = &runtime.config;
    let source = news_source(config, source)?;
    let candidates = source
        .fetch(config.news_count)
        .await
        .with_context(|| format!("failed to fetch news from {}", source.name()))?;
    tracing::info!(source = source.name(), count = candidates.len(), "fetched candidates");

    let news_log = runtime.open_log(NEWS_LOG).await?;
    let facts_log = runtime.open_log(TermKind::Fact.log_key()).await?;

    let outcome = run_news_curation(
        runtime.services(),
        &candidates,
        news_log.as_ref(),
        facts_log.as_ref(),
    )
    .await?;

    match &outcome.published {
        Some(post) => println!("published {}: {}", post.tweet.id, post.tweet.text),
        None => println!("no news published"),
    }
    println!(
        "relevant={} duplicates={} overlapping={} failed={}",
        outcome.relevant, outcome.skipped_duplicates, outcome.skipped_overlapping, outcome.failed
    );
    if let Some(fallback) = &outcome.fallback {
        print_term_outcome(fallback);
    }
    Ok(())
}

pub(crate) async fn run_tweet(
    runtime: &Runtime,
    title: String,
    description: String,
    url: String,
) -> anyhow::Result<()> {
    let item = NewsItem {
        title,
        description,
        url,
    };
    let tweet = compose_news_tweet(runtime.services(), &item).await?;
    println!("published {}: {}", tweet.id, tweet.text);
    Ok(())
}

pub(crate) async fn run_raw(runtime: &Runtime, text: &str) -> anyhow::Result<()> {
    let log = runtime.open_log(RAW_TWEETS_LOG).await?;
    let tweet = publish_raw(runtime.services(), text, log.as_ref()).await?;
    println!("published {}: {}", tweet.id, tweet.text);
    Ok(())
}

pub(crate) async fn run_term(runtime: &Runtime, kind: TermKind) -> anyhow::Result<()> {
    let log = runtime.open_log(kind.log_key()).await?;
    let outcome = run_term_tweet(runtime.services(), kind, log.as_ref()).await?;
    print_term_outcome(&outcome);
    Ok(())
}

fn print_term_outcome(outcome: &TermOutcome) {
    match outcome {
        TermOutcome::Published { term, tweet } => {
            println!("published {} for {term:?}: {}", tweet.id, tweet.text);
        }
        TermOutcome::Duplicate { term } => println!("{term:?} was already posted, skipped"),
        TermOutcome::TooLong { term, attempts } => {
            println!("no tweet for {term:?} fitted after {attempts} attempts");
        }
    }
}

pub(crate) async fn run_history(config: &AppConfig, log: &str, last: usize) -> anyhow::Result<()> {
    let history = open_durable_log(config, log)?;
    let entries = history
        .recent(last)
        .await
        .with_context(|| format!("failed to read {log}"))?;
    if entries.is_empty() {
        println!("{log} is empty");
    }
    for entry in entries {
        println!("{entry}");
    }
    Ok(())
}
