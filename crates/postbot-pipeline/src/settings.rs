use postbot_core::AppConfig;
use postbot_llm::ChatModel;
use postbot_social::Publisher;

/// Model names per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Models {
    /// Relevance filtering.
    pub chat: String,
    /// Novelty scoring.
    pub novelty: String,
    /// Tweet, term and quote generation.
    pub creative: String,
}

/// Tunables shared by every job.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub models: Models,
    pub tweet_max_attempts: u32,
    pub novelty_threshold: u8,
    pub history_window: usize,
    pub novelty_window: usize,
    pub term_window: usize,
    pub fact_fallback_probability: f64,
    pub relevant_topics: Vec<String>,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            models: Models {
                chat: config.chat_model.clone(),
                novelty: config.novelty_model.clone(),
                creative: config.creative_model.clone(),
            },
            tweet_max_attempts: config.tweet_max_attempts,
            novelty_threshold: config.novelty_threshold,
            history_window: config.history_window,
            novelty_window: config.novelty_window,
            term_window: config.term_window,
            fact_fallback_probability: config.fact_fallback_probability,
            relevant_topics: config.relevant_topics.clone(),
        }
    }
}

/// The external collaborators a job needs.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub llm: &'a dyn ChatModel,
    pub publisher: &'a dyn Publisher,
    pub settings: &'a PipelineSettings,
}
