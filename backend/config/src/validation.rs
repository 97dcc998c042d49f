//! Config validation: checks with user-friendly error messages.
//!
//! Errors mark values that cannot work; warnings mark a degraded session
//! (for example missing credentials: every question gets the fallback answer).

use crate::schema::DocChatConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every warning and error as a tracing event.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &DocChatConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_provider(config, &mut report);
    validate_generation(config, &mut report);
    validate_pricing(config, &mut report);
    validate_documents(config, &mut report);
    validate_history(config, &mut report);
    validate_ui(config, &mut report);
    report
}

fn validate_provider(config: &DocChatConfig, report: &mut ValidationReport) {
    for setting in config.provider.missing_settings() {
        report.warn(
            format!("provider.{setting}"),
            "Not set; questions will get the fallback answer until it is configured",
        );
    }
}

fn validate_generation(config: &DocChatConfig, report: &mut ValidationReport) {
    let generation = &config.generation;
    if generation.max_tokens == Some(0) {
        report.error("generation.maxTokens", "maxTokens must be >= 1");
    }
    if let Some(t) = generation.temperature {
        if !(0.0..=2.0).contains(&t) {
            report.error("generation.temperature", format!("temperature {t} is outside 0.0..=2.0"));
        }
    }
    if generation.n == Some(0) {
        report.error("generation.n", "n must be >= 1");
    }
    if generation.timeout_secs == Some(0) {
        report.error("generation.timeoutSecs", "timeoutSecs must be >= 1");
    }
}

fn validate_pricing(config: &DocChatConfig, report: &mut ValidationReport) {
    if let Some(rate) = config.pricing.cost_per_thousand_tokens {
        if !rate.is_finite() || rate < 0.0 {
            report.error(
                "pricing.costPerThousandTokens",
                format!("rate {rate} must be a finite, non-negative number"),
            );
        }
    }
}

fn validate_documents(config: &DocChatConfig, report: &mut ValidationReport) {
    let documents = &config.documents;
    if documents.summary_sentences == Some(0) {
        report.warn("documents.summarySentences", "0 sentences leaves every summary empty");
    }
    if documents.context_char_budget == Some(0) {
        report.warn("documents.contextCharBudget", "A 0 character budget sends an empty context");
    }
}

fn validate_history(config: &DocChatConfig, report: &mut ValidationReport) {
    if config.history.max_messages == Some(0) {
        report.error("history.maxMessages", "maxMessages must be >= 1 to send the question");
    }
}

fn validate_ui(config: &DocChatConfig, report: &mut ValidationReport) {
    let Some(questions) = &config.ui.example_questions else { return };
    for (i, q) in questions.iter().enumerate() {
        if q.trim().is_empty() {
            report.error(format!("ui.exampleQuestions[{i}]"), "Example question cannot be empty");
        }
    }
}
