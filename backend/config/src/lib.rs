//! `docchat-config` - runtime configuration for docchat.
//!
//! Provides:
//! - Typed config schema (documents, provider, generation, pricing, history, UI)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Environment overrides for provider credentials
//! - Default value application
//! - Validation with errors and warnings
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::redact;
pub use schema::{DocChatConfig, ProviderKind};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, substitute env vars, apply env overrides and defaults, and validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// problems are returned, never raised; the caller logs them with
/// [`ValidationReport::log`] once its subscriber is installed.
pub async fn load_and_prepare(path: &Path) -> Result<(DocChatConfig, ValidationReport)> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: DocChatConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    Ok((config, report))
}
