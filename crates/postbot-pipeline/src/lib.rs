//! The bot's jobs: news curation, term tweets, and raw tweets.
//!
//! Every job talks to the outside world only through the [`ChatModel`],
//! [`Publisher`] and [`HistoryLog`] seams bundled in [`Services`].
//!
//! [`ChatModel`]: postbot_llm::ChatModel
//! [`Publisher`]: postbot_social::Publisher
//! [`HistoryLog`]: postbot_store::HistoryLog

pub mod compose;
pub mod curate;
pub mod error;
pub mod gate;
pub mod raw;
pub mod settings;
pub mod term;

#[cfg(test)]
mod testing;

pub use compose::compose_news_tweet;
pub use curate::{run_news_curation, CurationOutcome, NewsPost};
pub use error::PipelineError;
pub use gate::{NoveltyGate, Verdict};
pub use raw::publish_raw;
pub use settings::{Models, PipelineSettings, Services};
pub use term::{run_term_tweet, TermOutcome};
