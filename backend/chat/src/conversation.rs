//! Ordered message history for one session.
//!
//! The history always starts with two system messages (instructions, then the
//! document context). After that, user and assistant messages strictly
//! alternate, starting with a user message. Nothing is ever removed.

use docchat_core::{Message, Role};
use thiserror::Error;

/// Number of leading system messages created by [`ConversationState::initialize`].
pub const SYSTEM_MESSAGE_COUNT: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("conversation has not been initialized")]
    NotInitialized,

    #[error("a question is already waiting for its answer")]
    AwaitingAnswer,

    #[error("there is no question to answer")]
    NoPendingQuestion,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the two leading system messages.
    ///
    /// Returns `false` (and changes nothing) if already initialized.
    pub fn initialize(&mut self, instructions: impl Into<String>, context: impl Into<String>) -> bool {
        if self.is_initialized() {
            return false;
        }
        self.messages.push(Message::system(instructions));
        self.messages.push(Message::system(context));
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.messages.len() >= SYSTEM_MESSAGE_COUNT
    }

    pub fn append_user(&mut self, content: impl Into<String>) -> Result<(), ConversationError> {
        if !self.is_initialized() {
            return Err(ConversationError::NotInitialized);
        }
        if self.has_pending_question() {
            return Err(ConversationError::AwaitingAnswer);
        }
        self.messages.push(Message::user(content));
        Ok(())
    }

    pub fn append_assistant(&mut self, content: impl Into<String>) -> Result<(), ConversationError> {
        if !self.is_initialized() {
            return Err(ConversationError::NotInitialized);
        }
        if !self.has_pending_question() {
            return Err(ConversationError::NoPendingQuestion);
        }
        self.messages.push(Message::assistant(content));
        Ok(())
    }

    /// Whether the last message is a user question without an answer yet.
    pub fn has_pending_question(&self) -> bool {
        self.messages.last().map(|m| m.role) == Some(Role::User)
    }

    /// Full history, system messages included, as submitted to the provider.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// History without the leading system messages, for rendering.
    pub fn displayable_history(&self) -> &[Message] {
        self.messages.get(SYSTEM_MESSAGE_COUNT..).unwrap_or(&[])
    }

    /// Number of answered questions.
    pub fn completed_turns(&self) -> usize {
        self.displayable_history()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> ConversationState {
        let mut state = ConversationState::new();
        assert!(state.initialize("You answer questions.", "Documents used and their summaries:\n"));
        state
    }

    #[test]
    fn test_initialize_creates_two_system_messages_once() {
        let mut state = initialized();
        assert!(!state.initialize("other", "other"));

        let history = state.history();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(Message::is_system));
        assert_eq!(history[0].content, "You answer questions.");
        assert!(state.displayable_history().is_empty());
    }

    #[test]
    fn test_uninitialized_rejects_appends() {
        let mut state = ConversationState::new();
        assert!(state.history().is_empty());
        assert!(state.displayable_history().is_empty());
        assert_eq!(state.append_user("hi"), Err(ConversationError::NotInitialized));
        assert_eq!(state.append_assistant("hi"), Err(ConversationError::NotInitialized));
    }

    #[test]
    fn test_strict_alternation() {
        let mut state = initialized();
        assert_eq!(state.append_assistant("no"), Err(ConversationError::NoPendingQuestion));

        state.append_user("q1").unwrap();
        assert!(state.has_pending_question());
        assert_eq!(state.append_user("q2"), Err(ConversationError::AwaitingAnswer));

        state.append_assistant("a1").unwrap();
        assert_eq!(state.append_assistant("a2"), Err(ConversationError::NoPendingQuestion));

        let roles: Vec<Role> = state.displayable_history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(state.history().len(), 4);
        assert_eq!(state.completed_turns(), 1);
    }
}
