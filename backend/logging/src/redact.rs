//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)|(api-key[:=]\s*[a-fA-F0-9]{32})")
        .unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").to_string()
}
