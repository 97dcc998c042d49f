//! Per-session state handed to the controller by `&mut`.

use docchat_core::Message;
use tracing::warn;
use uuid::Uuid;

use crate::controller::FALLBACK_ANSWER;
use crate::conversation::ConversationState;
use crate::usage::{SessionUsage, UsageAccountant, UsageRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Everything that lives for one user session: history, usage, and the
/// question/answer state. Exclusive borrows make in-flight questions
/// single-flight per session.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    conversation: ConversationState,
    usage: UsageAccountant,
    state: InteractionState,
}

impl ChatSession {
    /// Start a session seeded with the instructions and document context.
    pub fn new(instructions: impl Into<String>, context: impl Into<String>, usage: UsageAccountant) -> Self {
        let mut conversation = ConversationState::new();
        conversation.initialize(instructions, context);
        Self {
            id: Uuid::new_v4(),
            conversation,
            usage,
            state: InteractionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn displayable_history(&self) -> &[Message] {
        self.conversation.displayable_history()
    }

    pub fn latest_usage(&self) -> Option<&UsageRecord> {
        self.usage.latest()
    }

    pub fn session_usage(&self) -> &SessionUsage {
        self.usage.session()
    }

    pub(crate) fn conversation_mut(&mut self) -> &mut ConversationState {
        &mut self.conversation
    }

    pub(crate) fn usage_mut(&mut self) -> &mut UsageAccountant {
        &mut self.usage
    }

    pub(crate) fn set_state(&mut self, state: InteractionState) {
        self.state = state;
    }

    /// Close out a question whose request future was dropped before it
    /// finished, so the history keeps alternating.
    pub(crate) fn recover_interrupted_turn(&mut self) {
        if self.state != InteractionState::AwaitingResponse {
            return;
        }
        warn!(session = %self.id, "Previous question was interrupted; closing it with the fallback answer");
        if self.conversation.has_pending_question() {
            // Cannot fail: a question is pending.
            let _ = self.conversation.append_assistant(FALLBACK_ANSWER);
        }
        self.state = InteractionState::Idle;
    }
}
