//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside YAML string values, resolved at load
//!   time. Only uppercase `[A-Z_][A-Z0-9_]*` names are matched and `$${VAR}`
//!   escapes to a literal `${VAR}`.
//! - Well-known variables (`AZURE_OPENAI_*`, `DOCCHAT_*`) that override the
//!   file outright.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::{DocChatConfig, ProviderKind};

/// Optionally-escaped env var reference; group 1 is the escape `$`.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_API_BASE";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_PROVIDER: &str = "DOCCHAT_PROVIDER";
pub const ENV_DOCUMENTS_DIR: &str = "DOCCHAT_DOCUMENTS_DIR";
pub const ENV_LOG_LEVEL: &str = "DOCCHAT_LOG_LEVEL";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Only string leaves are processed. Returns an error if any referenced env
/// var is not set or is empty.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply well-known environment variables on top of the loaded file.
pub fn apply_env_overrides(config: DocChatConfig) -> DocChatConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
///
/// Empty values are ignored. An unknown `DOCCHAT_PROVIDER` is ignored too and
/// reported by validation through the unchanged kind.
pub fn apply_env_overrides_with(mut config: DocChatConfig, env: &HashMap<String, String>) -> DocChatConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();

    if let Some(kind) = get(ENV_PROVIDER) {
        match kind.to_ascii_lowercase().as_str() {
            "azure" => config.provider.kind = Some(ProviderKind::Azure),
            "openai" => config.provider.kind = Some(ProviderKind::Openai),
            other => tracing::warn!(value = other, "Ignoring unknown {ENV_PROVIDER}"),
        }
    }
    if let Some(endpoint) = get(ENV_ENDPOINT) {
        config.provider.endpoint = Some(endpoint);
    }
    if let Some(key) = get(ENV_API_KEY) {
        config.provider.api_key = Some(key);
    }
    if let Some(version) = get(ENV_API_VERSION) {
        config.provider.api_version = Some(version);
    }
    if let Some(deployment) = get(ENV_DEPLOYMENT) {
        config.provider.deployment = Some(deployment);
    }
    if let Some(dir) = get(ENV_DOCUMENTS_DIR) {
        config.documents.dir = Some(PathBuf::from(dir));
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.level = Some(level);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_substitutes_nested_strings() {
        let value = json!({"provider": {"apiKey": "${MY_KEY}", "endpoint": "https://${HOST}/"}, "n": 1});
        let resolved = resolve_env_vars_with(&value, &env(&[("MY_KEY", "k1"), ("HOST", "h.example")])).unwrap();
        assert_eq!(
            resolved,
            json!({"provider": {"apiKey": "k1", "endpoint": "https://h.example/"}, "n": 1})
        );
    }

    #[test]
    fn test_missing_var_reports_path() {
        let value = json!({"ui": {"exampleQuestions": ["ok", "${NOPE}"]}});
        let err = resolve_env_vars_with(&value, &env(&[])).unwrap_err();
        let err = err.downcast::<MissingEnvVarError>().unwrap();
        assert_eq!(err.var_name, "NOPE");
        assert_eq!(err.config_path, "ui.exampleQuestions[1]");
    }

    #[test]
    fn test_escaped_reference_is_literal() {
        let value = json!("keep $${LITERAL} but use ${REAL}");
        let resolved = resolve_env_vars_with(&value, &env(&[("REAL", "x")])).unwrap();
        assert_eq!(resolved, json!("keep ${LITERAL} but use x"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = DocChatConfig::default();
        config.provider.deployment = Some("from-file".into());
        config.provider.endpoint = Some("https://file.example".into());

        let config = apply_env_overrides_with(
            config,
            &env(&[
                (ENV_DEPLOYMENT, "from-env"),
                (ENV_API_KEY, "secret"),
                (ENV_ENDPOINT, "  "),
                (ENV_PROVIDER, "OpenAI"),
                (ENV_DOCUMENTS_DIR, "/srv/docs"),
            ]),
        );

        assert_eq!(config.provider.deployment.as_deref(), Some("from-env"));
        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert_eq!(config.provider.endpoint.as_deref(), Some("https://file.example"));
        assert_eq!(config.provider.kind, Some(ProviderKind::Openai));
        assert_eq!(config.documents.dir, Some(PathBuf::from("/srv/docs")));
    }
}
