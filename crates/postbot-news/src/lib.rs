//! Candidate news for the curation run.
//!
//! [`BingNewsClient`] searches Bing News; [`HackerNewsClient`] reads the
//! Hacker News front page. Both implement [`NewsSource`].

pub mod bing;
pub mod error;
pub mod hackernews;

pub use bing::BingNewsClient;
pub use error::NewsError;
pub use hackernews::HackerNewsClient;

use async_trait::async_trait;
use postbot_core::NewsItem;

/// Anything that can hand the curation run a batch of candidate stories.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch up to `count` candidates, best first.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError`] if the upstream API fails.
    async fn fetch(&self, count: usize) -> Result<Vec<NewsItem>, NewsError>;
}
