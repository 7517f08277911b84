//! Prompt → completion → normalization pipeline shared by translate and judge.

pub mod invoker;
pub mod normalizer;
pub mod prompt_builder;
pub mod types;

use tracing::info;

use crate::config::{CompletionParams, LlmConfig};
use crate::error::ApiError;
use crate::llm::CompletionInterface;

pub use types::*;

/// Per-operation strategy plugged into [`run`]
pub trait WizardOperation: Send + Sync {
    type Output;

    fn name(&self) -> &'static str;

    fn build_prompt(&self, text: &str) -> PromptPair;

    fn params<'a>(&self, config: &'a LlmConfig) -> &'a CompletionParams;

    /// Turn the raw reply into the response body; never fails
    fn normalize(&self, text: &str, raw: &str) -> Self::Output;
}

pub struct Translate;

pub struct Judge;

impl WizardOperation for Translate {
    type Output = TranslationResult;

    fn name(&self) -> &'static str {
        "translate"
    }

    fn build_prompt(&self, text: &str) -> PromptPair {
        prompt_builder::translate_prompt(text)
    }

    fn params<'a>(&self, config: &'a LlmConfig) -> &'a CompletionParams {
        &config.translate
    }

    fn normalize(&self, text: &str, raw: &str) -> TranslationResult {
        TranslationResult {
            original_text: text.to_string(),
            wizard_texts: normalizer::normalize_translations(raw),
        }
    }
}

impl WizardOperation for Judge {
    type Output = JudgementResult;

    fn name(&self) -> &'static str {
        "judge"
    }

    fn build_prompt(&self, text: &str) -> PromptPair {
        prompt_builder::judge_prompt(text)
    }

    fn params<'a>(&self, config: &'a LlmConfig) -> &'a CompletionParams {
        &config.judge
    }

    fn normalize(&self, text: &str, raw: &str) -> JudgementResult {
        let judgement = normalizer::normalize_judgement(raw);
        JudgementResult {
            text: text.to_string(),
            score: judgement.score,
            feedback: judgement.feedback,
            suggestions: judgement.suggestions,
        }
    }
}

pub fn validate_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::Validation("Text cannot be empty".to_string()));
    }
    Ok(())
}

/// Validate, build the prompt, call upstream, normalize
pub async fn run<O: WizardOperation>(
    op: &O,
    llm: &dyn CompletionInterface,
    config: &LlmConfig,
    text: &str,
) -> Result<O::Output, ApiError> {
    validate_text(text)?;

    info!("Running {} for {} chars of input", op.name(), text.chars().count());
    let prompt = op.build_prompt(text);
    let raw = invoker::invoke(llm, op.params(config), prompt).await?;
    Ok(op.normalize(text, &raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock_llm::MockLLM;

    #[tokio::test]
    async fn test_translate_pipeline_pads() {
        let llm = MockLLM::replying(r#"{"translations":["a","b"]}"#);
        let result = run(&Translate, &llm, &LlmConfig::default(), " Hello ").await.unwrap();

        assert_eq!(result.original_text, " Hello ");
        assert_eq!(result.wizard_texts, ["a", "b", "b"].map(String::from));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_translate_uses_translate_params() {
        let llm = MockLLM::replying("{}");
        let mut config = LlmConfig::default();
        config.translate.model = "gpt-test".to_string();
        config.translate.temperature = 0.3;
        run(&Translate, &llm, &config, "Hello").await.unwrap();

        let request = llm.last_request().unwrap();
        assert_eq!(request.model, "gpt-test");
        assert_eq!(request.max_tokens, 800);
        assert_eq!(request.temperature, 0.3);
        assert!(request.json_mode);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1].content.contains("\"Hello\""));
    }

    #[tokio::test]
    async fn test_judge_pipeline() {
        let llm = MockLLM::replying(
            r#"{"score":"9","feedback":"Well done","suggestions":["more archaism"]}"#,
        );
        let result = run(&Judge, &llm, &LlmConfig::default(), "Hark!").await.unwrap();

        assert_eq!(
            result,
            JudgementResult {
                text: "Hark!".to_string(),
                score: 9,
                feedback: "Well done".to_string(),
                suggestions: vec!["more archaism".to_string()],
            }
        );
        assert_eq!(llm.last_request().unwrap().max_tokens, 500);
    }

    #[tokio::test]
    async fn test_blank_text_skips_upstream() {
        let llm = MockLLM::replying("{}");
        for text in ["", "   ", "\n\t"] {
            let err = run(&Translate, &llm, &LlmConfig::default(), text).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(ref m) if m == "Text cannot be empty"));
            let err = run(&Judge, &llm, &LlmConfig::default(), text).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_masked() {
        let llm = MockLLM::failing("Incorrect API key provided");
        let err = run(&Translate, &llm, &LlmConfig::default(), "Hello").await.unwrap_err();

        match err {
            ApiError::Upstream(message) => assert!(message.contains("Incorrect API key provided")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_reply_uses_fallback() {
        let llm = MockLLM::replying("not json");
        let first = run(&Translate, &llm, &LlmConfig::default(), "Hi").await.unwrap();
        let second = run(&Translate, &llm, &LlmConfig::default(), "Hi").await.unwrap();
        assert_eq!(first.wizard_texts, normalizer::translation_fallback());
        assert_eq!(first, second);
    }
}
