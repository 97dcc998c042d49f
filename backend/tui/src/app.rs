//! TUI App State
//!
//! Everything the page displays. Conversation and usage fields are replaced
//! wholesale from worker snapshots, never edited here.

use docchat_chat::{SessionUsage, UsageRecord};
use docchat_core::Message;

use crate::worker::TurnSnapshot;

/// Static page text.
#[derive(Debug, Clone)]
pub struct UiText {
    pub title: String,
    pub greeting: String,
    pub example_questions: Vec<String>,
}

pub struct AppState {
    pub text: UiText,
    pub transcript: Vec<Message>,
    pub latest_usage: Option<UsageRecord>,
    pub session_usage: SessionUsage,
    pub notices: Vec<String>,
    pub input: String,
    pub busy: bool,
    pub usage_panel_open: bool,
    /// Lines scrolled back from the bottom of the transcript.
    pub scroll_back: u16,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(text: UiText) -> Self {
        Self {
            text,
            transcript: Vec::new(),
            latest_usage: None,
            session_usage: SessionUsage::default(),
            notices: Vec::new(),
            input: String::new(),
            busy: false,
            usage_panel_open: false,
            scroll_back: 0,
            should_quit: false,
        }
    }

    pub fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    /// Input hint: a first question, or a reply to the running conversation.
    pub fn placeholder(&self) -> &'static str {
        if self.transcript.is_empty() {
            "ask your question..."
        } else {
            "reply here..."
        }
    }

    /// Take in the state after a finished turn.
    pub fn apply(&mut self, snapshot: TurnSnapshot) {
        self.transcript = snapshot.transcript;
        self.latest_usage = snapshot.latest_usage;
        self.session_usage = snapshot.session_usage;
        if let Some(error) = snapshot.error {
            self.push_notice(format!("Error processing your question: {error}"));
        }
        self.busy = false;
        self.scroll_back = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn text() -> UiText {
        UiText {
            title: "docchat".into(),
            greeting: "Hi!".into(),
            example_questions: vec!["Which documents?".into(), "Summarize enrollment".into()],
        }
    }

    #[test]
    fn test_placeholder_changes_after_first_turn() {
        let mut state = AppState::new(text());
        assert_eq!(state.placeholder(), "ask your question...");

        state.busy = true;
        state.apply(TurnSnapshot {
            transcript: vec![Message::user("q"), Message::assistant("a")],
            latest_usage: None,
            session_usage: SessionUsage::default(),
            error: None,
        });
        assert_eq!(state.placeholder(), "reply here...");
        assert!(!state.busy);
    }

    #[test]
    fn test_failed_snapshot_adds_notice() {
        let mut state = AppState::new(text());
        state.apply(TurnSnapshot {
            transcript: vec![],
            latest_usage: None,
            session_usage: SessionUsage::default(),
            error: Some("request timed out after 60s".into()),
        });
        assert_eq!(state.notices.len(), 1);
        assert!(state.notices[0].contains("timed out"));
    }
}
