use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RemoteServiceError;
use crate::message::Message;

/// Trait for remote chat completion services.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "azure-openai", "openai").
    fn name(&self) -> &str;

    /// Send the full history in one request and return the first choice.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, RemoteServiceError>;
}

/// Request to a chat provider.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Engine / deployment identifier selecting the hosted model.
    pub deployment: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of samples requested; only the first choice is used.
    pub n: u32,
}

/// Token counts reported by the provider for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Response from a chat provider.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub provider: String,
    pub usage: TokenUsage,
    pub latency_ms: u64,
}
