//! docchat runtime configuration schema.
//!
//! Typed for serde YAML/JSON with camelCase keys. Every leaf is optional so a
//! partial file (or no file) is valid; [`crate::defaults`] fills the gaps.

use docchat_documents::ContextTruncation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocChatConfig {
    /// Documents folder and context assembly
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Remote chat completion service
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Generation parameters sent with every request
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Cost estimation
    #[serde(default)]
    pub pricing: PricingConfig,

    /// History window applied before each request
    #[serde(default)]
    pub history: HistoryConfig,

    /// System instructions
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Terminal UI text
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Sentences kept per document summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_sentences: Option<usize>,
    /// Maximum characters of the assembled context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_char_budget: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncation: Option<ContextTruncation>,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Azure OpenAI, addressed by deployment name.
    #[default]
    Azure,
    /// Any OpenAI-compatible endpoint; `deployment` is the model name.
    Openai,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProviderKind>,
    /// Endpoint URL (Azure resource URL or OpenAI-compatible base URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Engine / deployment identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
}

impl ProviderConfig {
    /// Names of the settings still missing for the configured provider kind.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").is_empty();
        let mut missing = Vec::new();

        match self.kind.unwrap_or_default() {
            ProviderKind::Azure => {
                if blank(&self.endpoint) {
                    missing.push("endpoint");
                }
                if blank(&self.api_key) {
                    missing.push("apiKey");
                }
                if blank(&self.api_version) {
                    missing.push("apiVersion");
                }
            }
            ProviderKind::Openai => {
                if blank(&self.api_key) {
                    missing.push("apiKey");
                }
            }
        }
        if blank(&self.deployment) {
            missing.push("deployment");
        }
        missing
    }
}

// ---------------------------------------------------------------------------
// Generation, pricing, history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Samples per request; only the first is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// USD per 1,000 tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_thousand_tokens: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_messages: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_estimated_tokens: Option<usize>,
}

// ---------------------------------------------------------------------------
// Assistant, UI, logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    /// System instructions; `{document_count}` is replaced at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}
