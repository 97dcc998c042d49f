//! Startup wiring shared by every command.
//!
//! Runs once per process: read and summarize the documents folder, build the
//! bounded context, fill in the instructions template and pick the provider.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use docchat_chat::providers::{
    AzureOpenAiProvider, OpenAiCompatProvider, ScriptedProvider, UnconfiguredProvider,
};
use docchat_chat::{
    ChatSession, CostRate, GenerationSettings, HistoryWindow, InteractionController,
    UsageAccountant,
};
use docchat_config::defaults::{
    DEFAULT_COST_PER_THOUSAND_TOKENS, DEFAULT_DOCUMENTS_DIR, DEFAULT_INSTRUCTIONS,
};
use docchat_config::schema::ProviderConfig;
use docchat_config::{DocChatConfig, ProviderKind};
use docchat_core::ChatProvider;
use docchat_documents::{
    load_documents, ContextBuilder, DocumentReader, LoadedDocuments, Summarizer,
    DEFAULT_CONTEXT_CHAR_BUDGET, DEFAULT_SUMMARY_SENTENCES,
};

/// Placeholder in the instructions template.
const DOCUMENT_COUNT_PLACEHOLDER: &str = "{document_count}";

pub struct Startup {
    pub loaded: LoadedDocuments,
    pub context: String,
    pub instructions: String,
    pub controller: InteractionController,
    rate: CostRate,
}

impl Startup {
    pub fn prepare(config: &DocChatConfig, offline: bool) -> Result<Self> {
        let documents = &config.documents;
        let dir = documents
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENTS_DIR));
        let summarizer =
            Summarizer::new(documents.summary_sentences.unwrap_or(DEFAULT_SUMMARY_SENTENCES));
        let loaded = load_documents(&dir, &DocumentReader::new(), &summarizer);

        let context = ContextBuilder::new(
            documents
                .context_char_budget
                .unwrap_or(DEFAULT_CONTEXT_CHAR_BUDGET),
        )
        .with_truncation(documents.truncation.unwrap_or_default())
        .build(&loaded.documents);

        let instructions = render_instructions(
            config
                .assistant
                .instructions
                .as_deref()
                .unwrap_or(DEFAULT_INSTRUCTIONS),
            loaded.documents.len(),
        );

        let rate = CostRate::per_thousand(
            config
                .pricing
                .cost_per_thousand_tokens
                .unwrap_or(DEFAULT_COST_PER_THOUSAND_TOKENS),
        )
        .context("Invalid pricing.costPerThousandTokens")?;

        let provider = build_provider(&config.provider, offline);
        let controller = InteractionController::new(provider, generation_settings(config))
            .with_window(history_window(config));

        info!(
            dir = %dir.display(),
            documents = loaded.documents.len(),
            read_errors = loaded.errors.len(),
            context_chars = context.chars().count(),
            provider = controller.provider_name(),
            "Startup complete"
        );

        Ok(Self {
            loaded,
            context,
            instructions,
            controller,
            rate,
        })
    }

    /// A fresh session seeded with the instructions and the context.
    pub fn new_session(&self) -> ChatSession {
        ChatSession::new(
            self.instructions.clone(),
            self.context.clone(),
            UsageAccountant::new(self.rate),
        )
    }
}

pub fn render_instructions(template: &str, document_count: usize) -> String {
    template.replace(DOCUMENT_COUNT_PLACEHOLDER, &document_count.to_string())
}

/// Pick the chat provider. Missing credentials are not fatal: the session
/// starts and every question gets the fallback answer.
pub fn build_provider(provider: &ProviderConfig, offline: bool) -> Arc<dyn ChatProvider> {
    if offline {
        return Arc::new(ScriptedProvider::new());
    }

    let missing = provider.missing_settings();
    if !missing.is_empty() {
        warn!(missing = ?missing, "Chat provider is not configured");
        return Arc::new(UnconfiguredProvider::new(format!(
            "missing provider settings: {}",
            missing.join(", ")
        )));
    }

    let api_key = provider.api_key.clone().unwrap_or_default();
    match provider.kind.unwrap_or_default() {
        ProviderKind::Azure => Arc::new(AzureOpenAiProvider::new(
            provider.endpoint.clone().unwrap_or_default(),
            api_key,
            provider.api_version.clone().unwrap_or_default(),
        )),
        ProviderKind::Openai => {
            let client = OpenAiCompatProvider::new(api_key);
            match provider.endpoint.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => Arc::new(client.with_base_url(url)),
                _ => Arc::new(client),
            }
        }
    }
}

fn generation_settings(config: &DocChatConfig) -> GenerationSettings {
    let defaults = GenerationSettings::default();
    let generation = &config.generation;
    GenerationSettings {
        deployment: config.provider.deployment.clone().unwrap_or_default(),
        max_tokens: generation.max_tokens.unwrap_or(defaults.max_tokens),
        temperature: generation.temperature.unwrap_or(defaults.temperature),
        n: generation.n.unwrap_or(defaults.n),
        timeout: generation
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
    }
}

fn history_window(config: &DocChatConfig) -> HistoryWindow {
    HistoryWindow {
        max_messages: config.history.max_messages,
        max_estimated_tokens: config.history.max_estimated_tokens,
    }
}
