//! Chat-completion client and prompt templates for the tweet bot.
//!
//! [`ChatModel`] is the seam the pipeline talks to; [`OpenAiClient`] is the
//! production implementation. Prompt builders live in [`templates`] and the
//! parsers that turn model replies into typed values live in [`parse`].

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod templates;

mod retry;
mod types;

pub use client::OpenAiClient;
pub use error::LlmError;
pub use parse::{clean_term, clean_tweet, parse_novelty_score, parse_relevance};
pub use prompt::{ChatMessage, ChatModel, Prompt, Role};
