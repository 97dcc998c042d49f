use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use docchat_core::{ChatCompletion, ChatProvider, ChatRequest, RemoteServiceError};

use super::wire::{self, ChatBody};

/// Azure OpenAI chat completions, addressed by deployment name.
pub struct AzureOpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
}

impl AzureOpenAiProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: api_version.into(),
        }
    }

    fn completions_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint.trim_end_matches('/'),
            deployment
        )
    }
}

#[async_trait]
impl ChatProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, RemoteServiceError> {
        debug!(
            deployment = %request.deployment,
            messages = request.messages.len(),
            "Sending request to Azure OpenAI"
        );

        let builder = self
            .client
            .post(self.completions_url(&request.deployment))
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key);

        wire::send(self.name(), builder, &ChatBody::new(request, None)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::Message;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            deployment: "docs-gpt".into(),
            messages: vec![Message::system("be brief"), Message::user("hello?")],
            max_tokens: 500,
            temperature: 0.2,
            n: 1,
        }
    }

    #[tokio::test]
    async fn test_complete_parses_choice_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/docs-gpt/chat/completions"))
            .and(query_param("api-version", "2024-02-01"))
            .and(header("api-key", "secret"))
            .and(body_partial_json(serde_json::json!({
                "max_tokens": 500,
                "n": 1,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "  Hi there.  "}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })))
            .mount(&server)
            .await;

        let provider = AzureOpenAiProvider::new(format!("{}/", server.uri()), "secret", "2024-02-01");
        let completion = provider.complete(&request()).await.unwrap();

        assert_eq!(completion.content, "  Hi there.  ");
        assert_eq!(completion.provider, "azure-openai");
        assert_eq!(completion.usage.prompt_tokens, 12);
        assert_eq!(completion.usage.completion_tokens, 3);
        assert_eq!(completion.usage.total_tokens, 15);
    }

    #[tokio::test]
    async fn test_error_status_is_remote_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let provider = AzureOpenAiProvider::new(server.uri(), "secret", "2024-02-01");
        let err = provider.complete(&request()).await.unwrap_err();

        assert_eq!(
            err,
            RemoteServiceError::Status {
                provider: "azure-openai".into(),
                status: 429,
                body: "rate limited".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let provider = AzureOpenAiProvider::new(server.uri(), "secret", "2024-02-01");
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, RemoteServiceError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let provider = AzureOpenAiProvider::new(server.uri(), "secret", "2024-02-01");
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, RemoteServiceError::Decode { .. }));
    }
}
