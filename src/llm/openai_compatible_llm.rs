use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::completion_interface::{ChatMessage, CompletionInterface, CompletionRequest, LlmError};

/// OpenAI compatible LLM implementation
/// Talks to `{base_url}/chat/completions` directly
pub struct OpenAICompatibleLLM {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAICompatibleLLM {
    pub fn new(base_url: String, api_key: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Initialized OpenAICompatibleLLM: base_url={}", base_url);
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionInterface for OpenAICompatibleLLM {
    async fn chat_completion(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!(
            "POST {} model={} max_tokens={} temperature={}",
            url, request.model, request.max_tokens, request.temperature
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let result: ChatCompletionResponse = response.json().await?;
        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(json_mode: bool) -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
            max_tokens: 800,
            temperature: 1.0,
            json_mode,
        }
    }

    #[tokio::test]
    async fn test_returns_trimmed_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 800,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ],
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "  {\"translations\": []}\n"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let llm = OpenAICompatibleLLM::new(format!("{}/", server.uri()), "sk-test".to_string());
        let content = llm.chat_completion(request(true)).await.unwrap();
        assert_eq!(content, "{\"translations\": []}");
    }

    #[tokio::test]
    async fn test_omits_response_format_without_json_mode() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(|req: &wiremock::Request| {
                let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                let content = if body.get("response_format").is_some() {
                    "unexpected"
                } else {
                    "plain"
                };
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "choices": [{"message": {"content": content}}]
                }))
            })
            .mount(&server)
            .await;

        let llm = OpenAICompatibleLLM::new(server.uri(), "sk-test".to_string());
        assert_eq!(llm.chat_completion(request(false)).await.unwrap(), "plain");
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string("Rate limit reached for gpt-4o-mini"),
            )
            .mount(&server)
            .await;

        let llm = OpenAICompatibleLLM::new(server.uri(), "sk-test".to_string());
        let err = llm.chat_completion(request(true)).await.unwrap_err();
        assert!(matches!(err, LlmError::Status { status, .. } if status.as_u16() == 429));
        assert!(err.to_string().contains("Rate limit reached"));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": null}}]
            })))
            .mount(&server)
            .await;

        let llm = OpenAICompatibleLLM::new(server.uri(), "sk-test".to_string());
        let err = llm.chat_completion(request(true)).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        // Port 9 (discard) is assumed closed on the test host
        let llm = OpenAICompatibleLLM::new("http://127.0.0.1:9".to_string(), "sk".to_string());
        let err = llm.chat_completion(request(true)).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
