use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single role-tagged chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Everything the completion endpoint needs for one call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the provider for a JSON object instead of free text
    pub json_mode: bool,
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Error code: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion response contained no message content")]
    EmptyResponse,
}

/// Interface for a stateless completion client
/// Stateless means no memory or conversation history is kept between calls
#[async_trait]
pub trait CompletionInterface: Send + Sync {
    /// Run one completion and return the raw message content
    async fn chat_completion(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
