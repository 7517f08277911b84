use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::config::LlmConfig;
use crate::llm::completion_interface::CompletionInterface;
use crate::llm::openai_compatible_llm::OpenAICompatibleLLM;

/// Factory for creating completion clients
pub struct LLMFactory;

impl LLMFactory {
    /// Default API root for providers speaking the OpenAI-compatible protocol
    pub fn default_base_url(llm_provider: &str) -> Option<&'static str> {
        match llm_provider {
            "openai_llm" | "openai_compatible_llm" => Some("https://api.openai.com/v1"),
            "deepseek_llm" => Some("https://api.deepseek.com"),
            "groq_llm" => Some("https://api.groq.com/openai/v1"),
            "ollama_llm" => Some("http://localhost:11434/v1"),
            _ => None,
        }
    }

    /// Create a completion client based on the configuration.
    ///
    /// An explicit `base_url` in the config wins over the provider default.
    pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn CompletionInterface>> {
        info!("Initializing LLM: {}", config.provider);

        let default_url = Self::default_base_url(&config.provider)
            .ok_or_else(|| anyhow::anyhow!("Unsupported LLM provider: {}", config.provider))?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_url.to_string());

        Ok(Arc::new(OpenAICompatibleLLM::new(
            base_url,
            config.api_key.clone().unwrap_or_default(),
        )))
    }
}
