//! Publishing tweets.
//!
//! [`Publisher`] is the seam the pipeline posts through. [`TwitterClient`]
//! talks to the X/Twitter v2 API with OAuth 1.0a user-context signing;
//! [`DryRunPublisher`] only logs.

pub mod client;
pub mod dry_run;
pub mod error;
pub mod length;
pub mod publisher;

mod oauth;

pub use client::TwitterClient;
pub use dry_run::DryRunPublisher;
pub use error::SocialError;
pub use length::{check_tweet_length, weighted_length, MAX_TWEET_LENGTH, URL_LENGTH};
pub use publisher::{PublishedTweet, Publisher};
