//! Cron-driven jobs for long-running mode.

use std::sync::Arc;

use postbot_core::TermKind;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::commands;
use crate::runtime::Runtime;
use crate::NewsSourceArg;

/// Builds and starts the scheduler with the news, fact and stoic jobs.
///
/// The returned handle must be kept alive; dropping it stops all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if a cron expression is invalid or the
/// scheduler fails to start.
pub(crate) async fn build_scheduler(
    runtime: Arc<Runtime>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_news_job(&scheduler, Arc::clone(&runtime)).await?;
    register_term_job(&scheduler, Arc::clone(&runtime), TermKind::Fact).await?;
    register_term_job(&scheduler, runtime, TermKind::Stoic).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_news_job(
    scheduler: &JobScheduler,
    runtime: Arc<Runtime>,
) -> Result<(), JobSchedulerError> {
    let cron = runtime.config.news_schedule.clone();
    let source = if runtime.config.bing_search_api_key.is_some() {
        NewsSourceArg::Bing
    } else {
        NewsSourceArg::Hackernews
    };

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let runtime = Arc::clone(&runtime);

        Box::pin(async move {
            tracing::info!(?source, "scheduler: starting news run");
            if let Err(e) = commands::run_news(&runtime, source).await {
                tracing::error!(error = %format!("{e:#}"), "scheduler: news run failed");
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, "scheduler: registered news job");
    Ok(())
}

async fn register_term_job(
    scheduler: &JobScheduler,
    runtime: Arc<Runtime>,
    kind: TermKind,
) -> Result<(), JobSchedulerError> {
    let cron = match kind {
        TermKind::Fact => runtime.config.fact_schedule.clone(),
        TermKind::Stoic => runtime.config.stoic_schedule.clone(),
    };

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let runtime = Arc::clone(&runtime);

        Box::pin(async move {
            tracing::info!(%kind, "scheduler: starting term run");
            if let Err(e) = commands::run_term(&runtime, kind).await {
                tracing::error!(%kind, error = %format!("{e:#}"), "scheduler: term run failed");
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(%kind, cron = %cron, "scheduler: registered term job");
    Ok(())
}
