use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use docchat_core::{ChatCompletion, ChatProvider, ChatRequest, RemoteServiceError};

use super::wire::{self, ChatBody};

/// Any OpenAI-compatible `/chat/completions` endpoint with bearer auth.
/// The request's deployment is sent as the `model` field.
pub struct OpenAiCompatProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, RemoteServiceError> {
        debug!(model = %request.deployment, "Sending request to OpenAI-compatible endpoint");

        let builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", self.api_key));

        wire::send(
            self.name(),
            builder,
            &ChatBody::new(request, Some(request.deployment.as_str())),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::Message;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sends_model_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })))
            .mount(&server)
            .await;

        let provider = OpenAiCompatProvider::new("sk-test").with_base_url(format!("{}/v1", server.uri()));
        let completion = provider
            .complete(&ChatRequest {
                deployment: "gpt-4o-mini".into(),
                messages: vec![Message::user("hi")],
                max_tokens: 16,
                temperature: 0.0,
                n: 1,
            })
            .await
            .unwrap();

        assert_eq!(completion.content, "ok");
        assert_eq!(completion.usage, docchat_core::TokenUsage::default());
    }
}
