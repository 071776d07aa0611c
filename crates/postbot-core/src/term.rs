use serde::{Deserialize, Serialize};

/// The families of term-driven tweets the bot produces.
///
/// Each kind has its own history log so a fact term and a stoic quote never
/// collide during deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// Short explainers of machine-learning and data-science terms.
    Fact,
    /// Commentary on a stoic quote.
    Stoic,
}

impl TermKind {
    /// Name of the history log that records terms already tweeted.
    #[must_use]
    pub fn log_key(self) -> &'static str {
        match self {
            TermKind::Fact => "facts_log",
            TermKind::Stoic => "stoic_quotes_log",
        }
    }
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermKind::Fact => write!(f, "fact"),
            TermKind::Stoic => write!(f, "stoic"),
        }
    }
}

/// History log for curated news titles.
pub const NEWS_LOG: &str = "news_log";

/// History log for tweets published verbatim.
pub const RAW_TWEETS_LOG: &str = "tweets_log";
