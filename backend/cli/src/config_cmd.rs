//! `docchat config show`: the effective config with secrets masked, followed
//! by the validation report.

use anyhow::{Context, Result};

use docchat_config::{redact, DocChatConfig, ValidationReport};

use crate::terminal_output::{note_error, note_success, note_warn};

pub fn show(config: &DocChatConfig, report: &ValidationReport, json: bool) -> Result<()> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    let masked = redact(&value);

    let rendered = if json {
        serde_json::to_string_pretty(&masked)?
    } else {
        serde_yaml::to_string(&masked)?
    };
    println!("{}", rendered.trim_end());
    println!();

    for warning in &report.warnings {
        note_warn(&warning.to_string());
    }
    for error in &report.errors {
        note_error(&error.to_string());
    }
    if report.is_valid() && report.warnings.is_empty() {
        note_success("Config is valid.");
    }
    Ok(())
}
