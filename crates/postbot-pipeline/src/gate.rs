//! Decides whether a news title is new enough to post.

use postbot_llm::templates::novelty_prompt;
use postbot_llm::{parse_novelty_score, ChatModel, LlmError};

/// Result of checking one title against the posting history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The exact title is already in the history window.
    AlreadyPosted,
    /// Scored below the threshold.
    Novel { score: u8 },
    /// Scored at or above the threshold.
    Overlapping { score: u8 },
}

impl Verdict {
    #[must_use]
    pub fn is_novel(self) -> bool {
        matches!(self, Self::Novel { .. })
    }
}

#[derive(Debug, Clone)]
pub struct NoveltyGate {
    model: String,
    threshold: u8,
    novelty_window: usize,
}

impl NoveltyGate {
    #[must_use]
    pub fn new(model: &str, threshold: u8, novelty_window: usize) -> Self {
        Self {
            model: model.to_owned(),
            threshold,
            novelty_window,
        }
    }

    /// Check `title` against `history` (the history window, oldest first).
    ///
    /// An exact match short-circuits without calling the model. Otherwise
    /// the model scores overlap with the last `novelty_window` entries; a
    /// reply without a score counts as 0.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the model call itself fails.
    pub async fn assess(
        &self,
        llm: &dyn ChatModel,
        title: &str,
        history: &[String],
    ) -> Result<Verdict, LlmError> {
        if history.iter().any(|entry| entry == title) {
            tracing::info!(title = %title, "title already posted");
            return Ok(Verdict::AlreadyPosted);
        }

        let skip = history.len().saturating_sub(self.novelty_window);
        let recent = &history[skip..];
        let reply = llm
            .complete(&novelty_prompt(&self.model, title, recent))
            .await?;

        let score = parse_novelty_score(&reply).unwrap_or_else(|| {
            tracing::warn!(title = %title, reply = %reply, "no novelty score in reply, treating as 0");
            0
        });

        let verdict = if score < self.threshold {
            Verdict::Novel { score }
        } else {
            Verdict::Overlapping { score }
        };
        tracing::info!(title = %title, score, threshold = self.threshold, ?verdict, "novelty assessed");
        Ok(verdict)
    }
}
