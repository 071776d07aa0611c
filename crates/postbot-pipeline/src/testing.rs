//! Fakes for the pipeline's seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use postbot_llm::{ChatModel, LlmError, Prompt};
use postbot_social::{check_tweet_length, PublishedTweet, Publisher, SocialError};
use postbot_store::{HistoryLog, StoreError};

use crate::settings::{Models, PipelineSettings};

pub(crate) fn settings() -> PipelineSettings {
    PipelineSettings {
        models: Models {
            chat: "chat-model".to_string(),
            novelty: "novelty-model".to_string(),
            creative: "creative-model".to_string(),
        },
        tweet_max_attempts: 3,
        novelty_threshold: 3,
        history_window: 16,
        novelty_window: 10,
        term_window: 25,
        fact_fallback_probability: 0.0,
        relevant_topics: vec!["AI".to_string(), "Robotics".to_string()],
    }
}

/// Replies from per-model queues and records every prompt it sees.
#[derive(Default)]
pub(crate) struct ScriptedModel {
    replies: Mutex<Vec<(String, VecDeque<String>)>>,
    seen: Mutex<Vec<Prompt>>,
}

impl ScriptedModel {
    pub(crate) fn reply(self, model: &str, text: &str) -> Self {
        {
            let mut replies = self.replies.lock().unwrap();
            match replies.iter_mut().find(|(m, _)| m == model) {
                Some((_, queue)) => queue.push_back(text.to_string()),
                None => replies.push((model.to_string(), VecDeque::from([text.to_string()]))),
            }
        }
        self
    }

    pub(crate) fn prompts_for(&self, model: &str) -> Vec<Prompt> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.model == model)
            .cloned()
            .collect()
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(prompt.clone());
        let mut replies = self.replies.lock().unwrap();
        replies
            .iter_mut()
            .find(|(m, _)| *m == prompt.model)
            .and_then(|(_, queue)| queue.pop_front())
            .ok_or_else(|| LlmError::EmptyResponse {
                model: prompt.model.clone(),
            })
    }
}

/// Records published tweets; fails for texts containing a marker.
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    pub(crate) fail_marker: Option<String>,
    published: Mutex<Vec<String>>,
}

impl RecordingPublisher {
    pub(crate) fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
            published: Mutex::default(),
        }
    }

    pub(crate) fn published(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, text: &str) -> Result<PublishedTweet, SocialError> {
        check_tweet_length(text)?;
        if self
            .fail_marker
            .as_deref()
            .is_some_and(|marker| text.contains(marker))
        {
            return Err(SocialError::Api {
                status: 403,
                body: "duplicate content".to_string(),
            });
        }
        let mut published = self.published.lock().unwrap();
        published.push(text.to_string());
        Ok(PublishedTweet {
            id: published.len().to_string(),
            text: text.to_string(),
        })
    }
}

/// Empty log whose appends always fail as a storage outage would.
pub(crate) struct AppendFailingLog {
    key: String,
    attempts: AtomicUsize,
}

impl AppendFailingLog {
    pub(crate) fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryLog for AppendFailingLog {
    fn key(&self) -> &str {
        &self.key
    }

    async fn ensure(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }

    async fn append(&self, _entry: &str) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::UnexpectedStatus {
            op: "append block",
            status: 503,
            body: "ServerBusy".to_string(),
        })
    }
}
