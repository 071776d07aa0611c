use async_trait::async_trait;

use crate::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single-shot chat request: system instructions, a user task, and
/// optional few-shot examples.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub instructions: String,
    pub task: String,
    /// Alternating user/assistant turns demonstrating the expected answer.
    pub examples: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Prompt {
    /// Messages in the order they are sent: few-shot examples first, then
    /// the system instructions, then the task.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.examples.len() + 2);
        messages.extend(self.examples.iter().cloned());
        messages.push(ChatMessage::system(self.instructions.clone()));
        messages.push(ChatMessage::user(self.task.clone()));
        messages
    }
}

/// Anything that can answer a [`Prompt`] with text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the prompt and return the reply text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] on transport, API, or decoding failure.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}
