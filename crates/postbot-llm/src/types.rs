//! Wire types for the OpenAI chat-completions endpoint.

use serde::{Deserialize, Serialize};

use crate::prompt::Prompt;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn from_prompt(prompt: &'a Prompt) -> Self {
        Self {
            model: &prompt.model,
            messages: prompt
                .messages()
                .into_iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: m.content,
                })
                .collect(),
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}
