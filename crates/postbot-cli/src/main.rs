mod commands;
mod runtime;
mod schedule;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use postbot_core::TermKind;
use tracing_subscriber::EnvFilter;

use crate::runtime::Runtime;

#[derive(Debug, Parser)]
#[command(name = "postbot")]
#[command(about = "Curates AI news and posts tweets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NewsSourceArg {
    Bing,
    Hackernews,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one news curation pass
    News {
        /// Where candidate stories come from
        #[arg(long, value_enum, default_value_t = NewsSourceArg::Bing)]
        source: NewsSourceArg,
        /// Log the tweet instead of posting and keep history changes in memory
        #[arg(long)]
        dry_run: bool,
    },
    /// Compose and post a tweet for one news story
    Tweet {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Post text verbatim
    Raw {
        #[arg(long)]
        text: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Post a tweet about a new machine-learning term
    Fact {
        #[arg(long)]
        dry_run: bool,
    },
    /// Post a tweet about a new stoic quote
    Stoic {
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the most recent entries of a history log
    History {
        /// Log name, e.g. news_log, facts_log, stoic_quotes_log, tweets_log
        log: String,
        #[arg(long, default_value = "20")]
        last: usize,
    },
    /// Run the news, fact and stoic jobs on their cron schedules until ctrl-c
    Schedule,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Arc::new(postbot_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, command = ?cli.command, "starting");

    match cli.command {
        Commands::News { source, dry_run } => {
            let runtime = Runtime::new(config, dry_run)?;
            commands::run_news(&runtime, source).await?;
        }
        Commands::Tweet {
            title,
            description,
            url,
            dry_run,
        } => {
            let runtime = Runtime::new(config, dry_run)?;
            commands::run_tweet(&runtime, title, description, url).await?;
        }
        Commands::Raw { text, dry_run } => {
            let runtime = Runtime::new(config, dry_run)?;
            commands::run_raw(&runtime, &text).await?;
        }
        Commands::Fact { dry_run } => {
            let runtime = Runtime::new(config, dry_run)?;
            commands::run_term(&runtime, TermKind::Fact).await?;
        }
        Commands::Stoic { dry_run } => {
            let runtime = Runtime::new(config, dry_run)?;
            commands::run_term(&runtime, TermKind::Stoic).await?;
        }
        Commands::History { log, last } => {
            commands::run_history(&config, &log, last).await?;
        }
        Commands::Schedule => {
            let runtime = Arc::new(Runtime::new(config, false)?);
            let _scheduler = schedule::build_scheduler(runtime).await?;
            shutdown_signal().await;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}

#[cfg(test)]
mod tests;
