//! Chat Event Logger
//!
//! Structured per-session events (question, answer, usage, error) emitted
//! under the `chat_events` target, which the file layer writes as NDJSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum ChatEvent {
    Question {
        content: String,
    },
    Answer {
        content: String,
    },
    Usage {
        prompt_tokens: u64,
        completion_tokens: u64,
        total_tokens: u64,
        cost: f64,
    },
    Error {
        error_msg: String,
    },
}

impl ChatEvent {
    fn redacted(self) -> Self {
        match self {
            ChatEvent::Question { content } => ChatEvent::Question {
                content: redact_sensitive_data(&content),
            },
            ChatEvent::Answer { content } => ChatEvent::Answer {
                content: redact_sensitive_data(&content),
            },
            ChatEvent::Error { error_msg } => ChatEvent::Error {
                error_msg: redact_sensitive_data(&error_msg),
            },
            usage @ ChatEvent::Usage { .. } => usage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ChatEvent,
}

impl EventLogEntry {
    pub fn new(session_id: &str, event: ChatEvent) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event: event.redacted(),
        }
    }
}

pub struct ChatEventLogger;

impl ChatEventLogger {
    /// Redact and emit one chat event.
    pub fn log_event(session_id: &str, event: ChatEvent) {
        let entry = EventLogEntry::new(session_id, event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "chat_events", session_id = %entry.session_id, event = %json, "Chat event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_redacts_content() {
        let entry = EventLogEntry::new(
            "s-1",
            ChatEvent::Question {
                content: "my key is sk-abcdefghijklmnopqrstuvwxyz0123456789".into(),
            },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "Question");
        assert_eq!(json["event"]["content"], "my key is [REDACTED_TOKEN]");
        assert_eq!(json["session_id"], "s-1");
    }

    #[test]
    fn test_usage_passes_through() {
        let usage = ChatEvent::Usage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
            cost: 0.000006,
        };
        assert_eq!(EventLogEntry::new("s", usage.clone()).event, usage);
    }
}
