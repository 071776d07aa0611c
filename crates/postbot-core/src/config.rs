use crate::app_config::{AppConfig, BlobCredentials, Environment, TwitterCredentials};
use crate::ConfigError;

const DEFAULT_RELEVANT_TOPICS: &str = "machine learning, data science, robotics, openai, \
artificial intelligence, ai, neural networks, data mining, tensorflow, pytorch, nlp, \
data analytics, virtual assistants, chatbots, augmented reality, chatgpt, gpu, anthropic, \
microsoft, apple, nvidia";

const TWITTER_VARS: [&str; 4] = [
    "TWITTER_CONSUMER_KEY",
    "TWITTER_CONSUMER_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_SECRET",
];

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if required vars are missing or values are invalid.
#[allow(clippy::too_many_lines)]
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let openai_api_key = require("OPENAI_API_KEY")?;

    let env = parse_environment(&or_default("POSTBOT_ENV", "development"));
    let log_level = or_default("POSTBOT_LOG_LEVEL", "info");

    let twitter_values: Vec<Option<String>> = TWITTER_VARS.iter().map(|v| optional(v)).collect();
    let twitter = match twitter_values.as_slice() {
        [Some(ck), Some(cs), Some(at), Some(secret)] => Some(TwitterCredentials {
            consumer_key: ck.clone(),
            consumer_secret: cs.clone(),
            access_token: at.clone(),
            access_secret: secret.clone(),
        }),
        values if values.iter().all(Option::is_none) => None,
        values => {
            let missing: Vec<&str> = TWITTER_VARS
                .iter()
                .zip(values)
                .filter(|(_, v)| v.is_none())
                .map(|(k, _)| *k)
                .collect();
            return Err(invalid(
                "TWITTER_CONSUMER_KEY",
                format!(
                    "twitter credentials are partially configured; missing {}",
                    missing.join(", ")
                ),
            ));
        }
    };

    let blob = match (
        optional("AZURE_STORAGE_ACCOUNT"),
        optional("AZURE_STORAGE_KEY"),
    ) {
        (Some(account), Some(key)) => Some(BlobCredentials { account, key }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(invalid(
                "AZURE_STORAGE_KEY",
                "required when AZURE_STORAGE_ACCOUNT is set".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "AZURE_STORAGE_ACCOUNT",
                "required when AZURE_STORAGE_KEY is set".to_string(),
            ))
        }
    };

    let bing_search_api_key = optional("BING_SEARCH_API_KEY");
    let blob_container = or_default("POSTBOT_BLOB_CONTAINER", "botdata");
    let log_dir = PathBuf::from(or_default("POSTBOT_LOG_DIR", "./data"));

    let http_timeout_secs = parse_u64("POSTBOT_HTTP_TIMEOUT_SECS", "30")?;
    let http_max_retries = parse_u32("POSTBOT_HTTP_MAX_RETRIES", "3")?;
    let http_backoff_base_ms = parse_u64("POSTBOT_HTTP_BACKOFF_BASE_MS", "1000")?;

    let tweet_max_attempts = parse_u32("POSTBOT_TWEET_MAX_ATTEMPTS", "3")?;
    if tweet_max_attempts == 0 {
        return Err(invalid(
            "POSTBOT_TWEET_MAX_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }

    let novelty_threshold = or_default("POSTBOT_NOVELTY_THRESHOLD", "3")
        .parse::<u8>()
        .map_err(|e| invalid("POSTBOT_NOVELTY_THRESHOLD", e.to_string()))?;
    if novelty_threshold > 5 {
        return Err(invalid(
            "POSTBOT_NOVELTY_THRESHOLD",
            format!("must be between 0 and 5, got {novelty_threshold}"),
        ));
    }

    let history_window = parse_usize("POSTBOT_HISTORY_WINDOW", "16")?;
    let novelty_window = parse_usize("POSTBOT_NOVELTY_WINDOW", "10")?;
    let term_window = parse_usize("POSTBOT_TERM_WINDOW", "25")?;

    let fact_fallback_probability = or_default("POSTBOT_FACT_FALLBACK_PROBABILITY", "0.03")
        .parse::<f64>()
        .map_err(|e| invalid("POSTBOT_FACT_FALLBACK_PROBABILITY", e.to_string()))?;
    if !(0.0..=1.0).contains(&fact_fallback_probability) {
        return Err(invalid(
            "POSTBOT_FACT_FALLBACK_PROBABILITY",
            format!("must be between 0 and 1, got {fact_fallback_probability}"),
        ));
    }

    let news_query = or_default("POSTBOT_NEWS_QUERY", "Artificial Intelligence");
    let news_count = parse_usize("POSTBOT_NEWS_COUNT", "10")?;
    let relevant_topics = parse_topics(&or_default(
        "POSTBOT_RELEVANT_TOPICS",
        DEFAULT_RELEVANT_TOPICS,
    ));

    let chat_model = or_default("POSTBOT_CHAT_MODEL", "gpt-3.5-turbo-1106");
    let novelty_model = or_default("POSTBOT_NOVELTY_MODEL", "gpt-4-1106-preview");
    let creative_model = or_default("POSTBOT_CREATIVE_MODEL", "gpt-4-1106-preview");

    let news_schedule = or_default("POSTBOT_NEWS_SCHEDULE", "0 0 */2 * * *");
    let fact_schedule = or_default("POSTBOT_FACT_SCHEDULE", "0 30 9 * * *");
    let stoic_schedule = or_default("POSTBOT_STOIC_SCHEDULE", "0 0 7 * * *");

    Ok(AppConfig {
        env,
        log_level,
        openai_api_key,
        twitter,
        bing_search_api_key,
        blob,
        blob_container,
        log_dir,
        http_timeout_secs,
        http_max_retries,
        http_backoff_base_ms,
        tweet_max_attempts,
        novelty_threshold,
        history_window,
        novelty_window,
        term_window,
        fact_fallback_probability,
        news_query,
        news_count,
        relevant_topics,
        chat_model,
        novelty_model,
        creative_model,
        news_schedule,
        fact_schedule,
        stoic_schedule,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Split a comma-separated topic list, dropping blanks.
fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
