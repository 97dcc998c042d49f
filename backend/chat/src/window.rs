//! History windowing applied before a request is sent.
//!
//! The conversation itself keeps every message; only the submitted copy is
//! trimmed so long sessions stay inside the model's context limit.

use docchat_core::{Message, Role};
use tracing::debug;

/// Rough characters-per-token ratio used for budget estimates.
const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    /// Maximum non-system messages submitted per request.
    pub max_messages: Option<usize>,
    /// Maximum estimated prompt tokens, system messages included.
    pub max_estimated_tokens: Option<usize>,
}

impl HistoryWindow {
    /// No trimming at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Select the messages to submit.
    ///
    /// System messages are always kept. Older turns are dropped whole, oldest
    /// first, so the window always starts on a user message. The newest user
    /// message is kept even if it alone exceeds the budget.
    pub fn apply(&self, history: &[Message]) -> Vec<Message> {
        let (system, turns): (Vec<&Message>, Vec<&Message>) =
            history.iter().partition(|m| m.is_system());
        let system_tokens: usize = system.iter().map(|m| estimate_tokens(&m.content)).sum();

        let user_starts: Vec<usize> = turns
            .iter()
            .enumerate()
            .filter(|(_, m)| m.role == Role::User)
            .map(|(i, _)| i)
            .collect();

        let start = user_starts
            .iter()
            .copied()
            .find(|&i| self.fits(system_tokens, &turns[i..]))
            .or_else(|| user_starts.last().copied())
            .unwrap_or(0);

        if start > 0 {
            debug!(dropped = start, kept = turns.len() - start, "Windowed conversation history");
        }

        system
            .into_iter()
            .chain(turns[start..].iter().copied())
            .cloned()
            .collect()
    }

    fn fits(&self, system_tokens: usize, turns: &[&Message]) -> bool {
        if let Some(max) = self.max_messages {
            if turns.len() > max {
                return false;
            }
        }
        if let Some(max) = self.max_estimated_tokens {
            let tokens: usize = turns.iter().map(|m| estimate_tokens(&m.content)).sum();
            if system_tokens + tokens > max {
                return false;
            }
        }
        true
    }
}

/// Estimate tokens from character count, rounding up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}
