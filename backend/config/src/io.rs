//! Config file location and loading.

use crate::schema::DocChatConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the docchat config directory.
/// Priority: `DOCCHAT_CONFIG_DIR` env > `~/.docchat/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DOCCHAT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".docchat"),
        None => PathBuf::from(".docchat"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<DocChatConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(DocChatConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    if raw.trim().is_empty() {
        return Ok(DocChatConfig::default());
    }

    let config: DocChatConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&config_file_path(dir.path())).await.unwrap();
        assert!(config.provider.api_key.is_none());
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "generation: [not, a, map").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }

    #[tokio::test]
    async fn test_load_and_prepare_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(
            &path,
            "pricing:\n  costPerThousandTokens: 0.01\ngeneration:\n  maxTokens: 0\n",
        )
        .unwrap();

        let (config, report) = crate::load_and_prepare(&path).await.unwrap();
        assert_eq!(config.pricing.cost_per_thousand_tokens, Some(0.01));
        assert_eq!(config.generation.temperature, Some(0.2));
        assert!(report.errors.iter().any(|e| e.path == "generation.maxTokens"));
    }
}
