pub mod azure;
pub mod openai;
pub mod scripted;
mod wire;

use async_trait::async_trait;
use docchat_core::{ChatCompletion, ChatProvider, ChatRequest, RemoteServiceError};

pub use azure::AzureOpenAiProvider;
pub use openai::OpenAiCompatProvider;
pub use scripted::ScriptedProvider;

/// Stand-in used when credentials are missing: every question fails with
/// [`RemoteServiceError::NotConfigured`] so the session still runs.
pub struct UnconfiguredProvider {
    reason: String,
}

impl UnconfiguredProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatCompletion, RemoteServiceError> {
        Err(RemoteServiceError::NotConfigured(self.reason.clone()))
    }
}
