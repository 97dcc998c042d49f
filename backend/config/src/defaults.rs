//! Config defaults: fills every unset leaf after loading.

use docchat_documents::{ContextTruncation, DEFAULT_CONTEXT_CHAR_BUDGET, DEFAULT_SUMMARY_SENTENCES};
use std::path::PathBuf;

use crate::io::config_dir;
use crate::schema::{DocChatConfig, ProviderKind};

pub const DEFAULT_DOCUMENTS_DIR: &str = "documents";
pub const DEFAULT_API_VERSION: &str = "2024-02-01";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_SAMPLES: u32 = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_COST_PER_THOUSAND_TOKENS: f64 = 0.002;
pub const DEFAULT_HISTORY_MAX_MESSAGES: usize = 40;
pub const DEFAULT_HISTORY_MAX_ESTIMATED_TOKENS: usize = 6000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TITLE: &str = "docchat";
pub const DEFAULT_GREETING: &str = "Hi! How can we help you today?";

pub const DEFAULT_INSTRUCTIONS: &str = "You are an intelligent assistant that answers \
questions using only the data available in the {document_count} documents provided.";

pub const DEFAULT_EXAMPLE_QUESTIONS: [&str; 2] = [
    "Which documents did you use for training?",
    "Summarize the three main points of the re-enrollment process",
];

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: DocChatConfig) -> DocChatConfig {
    let config = apply_document_defaults(config);
    let config = apply_provider_defaults(config);
    let config = apply_generation_defaults(config);
    let config = apply_history_defaults(config);
    let config = apply_ui_defaults(config);
    apply_logging_defaults(config)
}

fn apply_document_defaults(mut config: DocChatConfig) -> DocChatConfig {
    let documents = &mut config.documents;
    documents.dir.get_or_insert_with(|| PathBuf::from(DEFAULT_DOCUMENTS_DIR));
    documents.summary_sentences.get_or_insert(DEFAULT_SUMMARY_SENTENCES);
    documents.context_char_budget.get_or_insert(DEFAULT_CONTEXT_CHAR_BUDGET);
    documents.truncation.get_or_insert(ContextTruncation::HardCut);
    config
}

/// Azure needs an API version; other kinds ignore it.
fn apply_provider_defaults(mut config: DocChatConfig) -> DocChatConfig {
    let provider = &mut config.provider;
    let kind = *provider.kind.get_or_insert(ProviderKind::Azure);
    if kind == ProviderKind::Azure && provider.api_version.is_none() {
        provider.api_version = Some(DEFAULT_API_VERSION.to_string());
    }
    config
}

fn apply_generation_defaults(mut config: DocChatConfig) -> DocChatConfig {
    let generation = &mut config.generation;
    generation.max_tokens.get_or_insert(DEFAULT_MAX_TOKENS);
    generation.temperature.get_or_insert(DEFAULT_TEMPERATURE);
    generation.n.get_or_insert(DEFAULT_SAMPLES);
    generation.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    config
        .pricing
        .cost_per_thousand_tokens
        .get_or_insert(DEFAULT_COST_PER_THOUSAND_TOKENS);
    config
}

fn apply_history_defaults(mut config: DocChatConfig) -> DocChatConfig {
    let history = &mut config.history;
    history.max_messages.get_or_insert(DEFAULT_HISTORY_MAX_MESSAGES);
    history
        .max_estimated_tokens
        .get_or_insert(DEFAULT_HISTORY_MAX_ESTIMATED_TOKENS);
    config
}

fn apply_ui_defaults(mut config: DocChatConfig) -> DocChatConfig {
    config
        .assistant
        .instructions
        .get_or_insert_with(|| DEFAULT_INSTRUCTIONS.to_string());

    let ui = &mut config.ui;
    ui.title.get_or_insert_with(|| DEFAULT_TITLE.to_string());
    ui.greeting.get_or_insert_with(|| DEFAULT_GREETING.to_string());
    ui.example_questions
        .get_or_insert_with(|| DEFAULT_EXAMPLE_QUESTIONS.iter().map(|q| q.to_string()).collect());
    config
}

fn apply_logging_defaults(mut config: DocChatConfig) -> DocChatConfig {
    let logging = &mut config.logging;
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.dir.get_or_insert_with(|| config_dir().join("logs"));
    config
}
