use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::completion_interface::{CompletionInterface, CompletionRequest, LlmError};

/// Canned completion client for tests
pub struct MockLLM {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockLLM {
    pub fn replying(raw: &str) -> Self {
        Self::with(Ok(raw.to_string()))
    }

    /// Every call fails with a non-success status carrying `message`
    pub fn failing(message: &str) -> Self {
        Self::with(Err(message.to_string()))
    }

    fn with(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionInterface for MockLLM {
    async fn chat_completion(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        self.reply.clone().map_err(|body| LlmError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body,
        })
    }
}
