use std::path::PathBuf;

use postbot_store::HistoryLog;

use super::*;

#[test]
fn parses_news_with_defaults() {
    let cli = Cli::try_parse_from(["postbot", "news"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::News {
            source: NewsSourceArg::Bing,
            dry_run: false
        }
    ));
}

#[test]
fn parses_news_hackernews_dry_run() {
    let cli = Cli::try_parse_from(["postbot", "news", "--source", "hackernews", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::News {
            source: NewsSourceArg::Hackernews,
            dry_run: true
        }
    ));
}

#[test]
fn rejects_unknown_news_source() {
    assert!(Cli::try_parse_from(["postbot", "news", "--source", "reddit"]).is_err());
}

#[test]
fn parses_tweet_with_optional_fields_defaulted() {
    let cli = Cli::try_parse_from(["postbot", "tweet", "--title", "Rust 2.0 released"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Tweet {
            ref title,
            ref description,
            ref url,
            dry_run: false
        } if title == "Rust 2.0 released" && description.is_empty() && url.is_empty()
    ));
}

#[test]
fn tweet_requires_title() {
    assert!(Cli::try_parse_from(["postbot", "tweet", "--url", "https://a.io"]).is_err());
}

#[test]
fn parses_raw_text() {
    let cli = Cli::try_parse_from(["postbot", "raw", "--text", "hello world", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Raw { ref text, dry_run: true } if text == "hello world"
    ));
}

#[test]
fn parses_fact_and_stoic() {
    let fact = Cli::try_parse_from(["postbot", "fact"]).unwrap();
    assert!(matches!(fact.command, Commands::Fact { dry_run: false }));
    let stoic = Cli::try_parse_from(["postbot", "stoic", "--dry-run"]).unwrap();
    assert!(matches!(stoic.command, Commands::Stoic { dry_run: true }));
}

#[test]
fn parses_history_with_last() {
    let cli = Cli::try_parse_from(["postbot", "history", "news_log", "--last", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::History { ref log, last: 5 } if log == "news_log"
    ));
}

#[test]
fn history_defaults_to_twenty_entries() {
    let cli = Cli::try_parse_from(["postbot", "history", "facts_log"]).unwrap();
    assert!(matches!(cli.command, Commands::History { last: 20, .. }));
}

#[test]
fn parses_schedule() {
    let cli = Cli::try_parse_from(["postbot", "schedule"]).unwrap();
    assert!(matches!(cli.command, Commands::Schedule));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["postbot"]).is_err());
}

fn test_config(log_dir: PathBuf) -> postbot_core::AppConfig {
    test_config_with(log_dir, &[])
}

fn test_config_with(log_dir: PathBuf, extra: &[(&str, &str)]) -> postbot_core::AppConfig {
    let mut vars = std::collections::HashMap::from([
        ("OPENAI_API_KEY".to_string(), "sk-test".to_string()),
        ("POSTBOT_LOG_DIR".to_string(), log_dir.display().to_string()),
    ]);
    vars.extend(extra.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));
    postbot_core::build_app_config(|key| {
        vars.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    })
    .expect("valid test config")
}

#[tokio::test]
async fn dry_run_log_is_seeded_but_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(test_config(dir.path().to_path_buf()));
    let durable = runtime::open_durable_log(&config, "news_log").unwrap();
    durable.append("Existing story").await.unwrap();

    let runtime = Runtime::new(Arc::clone(&config), true).unwrap();
    let log = runtime.open_log("news_log").await.unwrap();
    log.append("Dry run story").await.unwrap();

    assert_eq!(log.read_all().await.unwrap(), vec!["Existing story", "Dry run story"]);
    assert_eq!(durable.read_all().await.unwrap(), vec!["Existing story"]);
}

#[test]
fn live_run_without_twitter_credentials_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(test_config(dir.path().to_path_buf()));
    let err = Runtime::new(config, false).err().expect("should require credentials");
    assert!(err.to_string().contains("--dry-run"));
}

#[tokio::test]
async fn scheduler_accepts_default_cron_expressions() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(test_config(dir.path().to_path_buf()));
    assert_eq!(config.news_schedule, "0 0 */2 * * *");

    let runtime = Arc::new(Runtime::new(config, true).unwrap());
    let mut scheduler = schedule::build_scheduler(runtime)
        .await
        .expect("default schedules should register");
    scheduler.shutdown().await.unwrap();
}

#[tokio::test]
async fn scheduler_rejects_invalid_cron_expression() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(test_config_with(
        dir.path().to_path_buf(),
        &[("POSTBOT_STOIC_SCHEDULE", "every morning")],
    ));

    let runtime = Arc::new(Runtime::new(config, true).unwrap());
    assert!(schedule::build_scheduler(runtime).await.is_err());
}

#[test]
fn test_environment_refuses_live_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(test_config_with(
        dir.path().to_path_buf(),
        &[
            ("POSTBOT_ENV", "test"),
            ("TWITTER_CONSUMER_KEY", "ck"),
            ("TWITTER_CONSUMER_SECRET", "cs"),
            ("TWITTER_ACCESS_TOKEN", "at"),
            ("TWITTER_ACCESS_SECRET", "as"),
        ],
    ));

    let err = Runtime::new(Arc::clone(&config), false)
        .err()
        .expect("live run must be refused");
    assert!(err.to_string().contains("POSTBOT_ENV=test"));
    assert!(Runtime::new(config, true).is_ok());
}
