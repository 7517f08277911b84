use tracing::{debug, error};

use crate::config::CompletionParams;
use crate::error::ApiError;
use crate::llm::{ChatMessage, CompletionInterface, CompletionRequest};

use super::types::PromptPair;

/// Send the prompt pair upstream and return the raw reply text
pub async fn invoke(
    llm: &dyn CompletionInterface,
    params: &CompletionParams,
    prompt: PromptPair,
) -> Result<String, ApiError> {
    let request = CompletionRequest {
        model: params.model.clone(),
        messages: vec![ChatMessage::system(prompt.system), ChatMessage::user(prompt.user)],
        max_tokens: params.max_tokens,
        temperature: params.temperature,
        json_mode: params.json_mode,
    };

    match llm.chat_completion(request).await {
        Ok(raw) => {
            debug!("Completion returned {} chars", raw.len());
            Ok(raw.trim().to_string())
        }
        Err(e) => {
            error!("Completion request failed: {}", e);
            Err(e.into())
        }
    }
}
