use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use docchat_core::{ChatCompletion, ChatProvider, ChatRequest, RemoteServiceError, TokenUsage};

/// A provider that replays canned outcomes and remembers every request.
///
/// Once the script runs out it answers with the fallback reply.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ChatCompletion, RemoteServiceError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    fallback_reply: String,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            fallback_reply: "Scripted response".to_string(),
            delay: None,
        }
    }

    /// Queue a successful reply with the given token counts.
    pub fn with_reply(mut self, content: impl Into<String>, prompt_tokens: u64, completion_tokens: u64) -> Self {
        let completion = ChatCompletion {
            content: content.into(),
            provider: "scripted".to_string(),
            usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 0,
        };
        self.script.get_mut().push_back(Ok(completion));
        self
    }

    /// Queue a failure.
    pub fn with_error(mut self, error: RemoteServiceError) -> Self {
        self.script.get_mut().push_back(Err(error));
        self
    }

    /// Wait this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, RemoteServiceError> {
        self.requests.lock().await.push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().await.pop_front();
        next.unwrap_or_else(|| {
            Ok(ChatCompletion {
                content: self.fallback_reply.clone(),
                provider: "scripted".to_string(),
                usage: TokenUsage::default(),
                latency_ms: 0,
            })
        })
    }
}
