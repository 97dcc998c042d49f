//! Chat-completions wire format shared by the HTTP providers.

use std::time::Instant;

use docchat_core::{ChatCompletion, ChatRequest, Message, RemoteServiceError, TokenUsage};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
pub(crate) struct ChatBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: &'a [Message],
    pub max_tokens: u32,
    pub temperature: f32,
    pub n: u32,
}

impl<'a> ChatBody<'a> {
    pub fn new(request: &'a ChatRequest, model: Option<&'a str>) -> Self {
        Self {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            n: request.n,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Send a prepared request and decode the first choice plus usage.
pub(crate) async fn send(
    provider: &str,
    builder: RequestBuilder,
    body: &ChatBody<'_>,
) -> Result<ChatCompletion, RemoteServiceError> {
    let start = Instant::now();

    let response = builder
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| RemoteServiceError::Http {
            provider: provider.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(RemoteServiceError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: error_body,
        });
    }

    let chat_response: ChatResponse =
        response.json().await.map_err(|e| RemoteServiceError::Decode {
            provider: provider.to_string(),
            message: e.to_string(),
        })?;

    let content = chat_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| RemoteServiceError::EmptyResponse {
            provider: provider.to_string(),
        })?;

    let usage = chat_response.usage.unwrap_or_default();
    let latency_ms = start.elapsed().as_millis() as u64;
    debug!(
        provider,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        latency_ms,
        "Chat completion received"
    );

    Ok(ChatCompletion {
        content,
        provider: provider.to_string(),
        usage,
        latency_ms,
    })
}
