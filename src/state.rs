use std::sync::Arc;

use crate::config::Config;
use crate::llm::{CompletionInterface, LLMFactory};

/// Immutable per-process state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<dyn CompletionInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = LLMFactory::create_llm(&config.llm)?;
        Ok(Self::with_llm(config, llm))
    }

    pub fn with_llm(config: Config, llm: Arc<dyn CompletionInterface>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }
}
