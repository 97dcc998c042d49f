//! Config redaction: produce safe-to-share config snapshots by masking
//! credentials.

use serde_json::Value;

static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "token",
    "accessToken",
    "access_token",
    "secret",
    "password",
];

/// Redact a config JSON value, masking every sensitive field.
///
/// The first 4 characters are kept as a hint when the value is long enough.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            let hint = if s.chars().count() > 8 {
                format!("{}***", s.chars().take(4).collect::<String>())
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_masks_api_key_only() {
        let config = json!({
            "provider": {"apiKey": "0123456789abcdef", "endpoint": "https://x.example", "deployment": "docs"},
            "ui": {"title": "docchat"}
        });
        let redacted = redact(&config);
        assert_eq!(redacted["provider"]["apiKey"], "0123***");
        assert_eq!(redacted["provider"]["endpoint"], "https://x.example");
        assert_eq!(redacted["ui"]["title"], "docchat");
    }

    #[test]
    fn test_short_secret_fully_masked() {
        assert_eq!(redact(&json!({"apiKey": "abc"})), json!({"apiKey": "***"}));
    }
}
