use postbot_core::TermKind;
use postbot_llm::LlmError;
use postbot_social::SocialError;
use postbot_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("language model error: {0}")]
    Llm(#[from] LlmError),

    #[error("history log error: {0}")]
    Store(#[from] StoreError),

    #[error("publish error: {0}")]
    Social(#[from] SocialError),

    #[error("no tweet under the length limit after {attempts} attempts (last was {last_len})")]
    TweetTooLong { attempts: u32, last_len: usize },

    #[error("model returned an empty {kind}")]
    EmptyTerm { kind: TermKind },
}
