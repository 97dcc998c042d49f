//! One question → answer cycle.
//!
//! `Idle → AwaitingResponse → Idle`. A blank question is ignored. On success
//! the answer is appended and its usage recorded; on failure (provider error,
//! timeout, cancellation) a fallback answer is appended and usage is left
//! untouched.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use docchat_core::{ChatProvider, ChatRequest, RemoteServiceError};
use docchat_logging::{ChatEvent, ChatEventLogger};

use crate::session::{ChatSession, InteractionState};
use crate::usage::UsageRecord;
use crate::window::HistoryWindow;

/// Assistant message appended in place of a real answer when a request fails.
pub const FALLBACK_ANSWER: &str = "Sorry, an error occurred while processing your question.";

/// Parameters sent with every completion request.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub deployment: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub n: u32,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            deployment: String::new(),
            max_tokens: 500,
            temperature: 0.2,
            n: 1,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Result of [`InteractionController::ask`].
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank question; nothing changed.
    Ignored,
    Answered {
        answer: String,
        usage: UsageRecord,
    },
    Failed {
        fallback: String,
        error: RemoteServiceError,
    },
}

pub struct InteractionController {
    provider: Arc<dyn ChatProvider>,
    settings: GenerationSettings,
    window: HistoryWindow,
}

impl InteractionController {
    pub fn new(provider: Arc<dyn ChatProvider>, settings: GenerationSettings) -> Self {
        Self {
            provider,
            settings,
            window: HistoryWindow::unbounded(),
        }
    }

    pub fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = window;
        self
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask without a way to cancel other than the timeout.
    pub async fn ask(&self, session: &mut ChatSession, question: &str) -> TurnOutcome {
        self.ask_cancellable(session, question, &CancellationToken::new())
            .await
    }

    /// Run one question/answer cycle against `session`.
    pub async fn ask_cancellable(
        &self,
        session: &mut ChatSession,
        question: &str,
        cancel: &CancellationToken,
    ) -> TurnOutcome {
        let question = question.trim();
        if question.is_empty() {
            return TurnOutcome::Ignored;
        }

        session.recover_interrupted_turn();
        if let Err(e) = session.conversation_mut().append_user(question) {
            error!(session = %session.id(), error = %e, "Cannot accept question");
            return TurnOutcome::Ignored;
        }
        session.set_state(InteractionState::AwaitingResponse);

        let session_id = session.id().to_string();
        ChatEventLogger::log_event(
            &session_id,
            ChatEvent::Question {
                content: question.to_string(),
            },
        );

        let request = ChatRequest {
            deployment: self.settings.deployment.clone(),
            messages: self.window.apply(session.conversation().history()),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            n: self.settings.n,
        };

        info!(
            session = %session_id,
            provider = self.provider.name(),
            messages = request.messages.len(),
            "Asking question"
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RemoteServiceError::Cancelled),
            res = tokio::time::timeout(self.settings.timeout, self.provider.complete(&request)) => {
                res.unwrap_or(Err(RemoteServiceError::Timeout {
                    secs: self.settings.timeout.as_secs(),
                }))
            }
        };

        let outcome = match result {
            Ok(completion) => {
                let answer = completion.content.trim().to_string();
                let appended = session.conversation_mut().append_assistant(answer.clone());
                debug_assert!(appended.is_ok(), "question must still be pending: {appended:?}");
                let usage = session.usage_mut().record(&completion.usage);

                info!(
                    session = %session_id,
                    total_tokens = usage.total_tokens,
                    latency_ms = completion.latency_ms,
                    "Question answered"
                );
                ChatEventLogger::log_event(&session_id, ChatEvent::Answer { content: answer.clone() });
                ChatEventLogger::log_event(
                    &session_id,
                    ChatEvent::Usage {
                        prompt_tokens: usage.prompt_tokens,
                        completion_tokens: usage.completion_tokens,
                        total_tokens: usage.total_tokens,
                        cost: usage.cost,
                    },
                );
                TurnOutcome::Answered { answer, usage }
            }
            Err(error) => {
                let appended = session.conversation_mut().append_assistant(FALLBACK_ANSWER);
                debug_assert!(appended.is_ok(), "question must still be pending: {appended:?}");
                warn!(session = %session_id, error = %error, "Question failed");
                ChatEventLogger::log_event(
                    &session_id,
                    ChatEvent::Error {
                        error_msg: error.to_string(),
                    },
                );
                TurnOutcome::Failed {
                    fallback: FALLBACK_ANSWER.to_string(),
                    error,
                }
            }
        };

        session.set_state(InteractionState::Idle);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ScriptedProvider;
    use crate::usage::{CostRate, UsageAccountant};
    use docchat_core::{Message, Role};

    const CONTEXT: &str = "Documents used and their summaries:\n";

    fn session() -> ChatSession {
        ChatSession::new(
            "You answer from the documents.",
            CONTEXT,
            UsageAccountant::new(CostRate::per_thousand(0.002).unwrap()),
        )
    }

    fn controller(provider: Arc<ScriptedProvider>) -> InteractionController {
        InteractionController::new(
            provider,
            GenerationSettings {
                deployment: "docs".into(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_successful_cycles_alternate_and_accumulate() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_reply(" First answer. ", 100, 20)
                .with_reply("Second answer.", 150, 30)
                .with_reply("Third answer.", 200, 40),
        );
        let controller = controller(provider.clone());
        let mut session = session();

        let mut expected_tokens = 0;
        for (i, question) in ["q1", "q2", "q3"].iter().enumerate() {
            let before = *session.session_usage();
            let outcome = controller.ask(&mut session, question).await;
            let TurnOutcome::Answered { usage, .. } = &outcome else {
                panic!("expected an answer, got {outcome:?}");
            };
            expected_tokens += usage.total_tokens;

            assert_eq!(session.displayable_history().len(), 2 * (i + 1));
            assert!(session.session_usage().total_tokens >= before.total_tokens);
            assert_eq!(session.state(), InteractionState::Idle);
        }

        let roles: Vec<Role> = session.displayable_history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(session.displayable_history()[1].content, "First answer.");
        assert_eq!(session.session_usage().total_tokens, expected_tokens);
        assert_eq!(expected_tokens, 540);
        assert_eq!(session.latest_usage().unwrap().total_tokens, 240);

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].messages.len(), 3);
        assert_eq!(requests[2].messages.len(), 7);
        assert_eq!(requests[2].deployment, "docs");
        assert_eq!(requests[2].max_tokens, 500);
        assert_eq!(requests[2].n, 1);
        assert!(requests[2].messages[..2].iter().all(Message::is_system));
    }

    #[tokio::test]
    async fn test_failure_appends_fallback_and_keeps_usage() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_reply("Fine.", 10, 5)
                .with_error(RemoteServiceError::Http {
                    provider: "scripted".into(),
                    message: "connection reset".into(),
                }),
        );
        let controller = controller(provider);
        let mut session = session();

        controller.ask(&mut session, "first").await;
        let usage_before = *session.session_usage();
        let latest_before = session.latest_usage().copied();

        let outcome = controller.ask(&mut session, "second").await;
        assert!(matches!(
            outcome,
            TurnOutcome::Failed { ref fallback, error: RemoteServiceError::Http { .. } } if fallback == FALLBACK_ANSWER
        ));

        let shown = session.displayable_history();
        assert_eq!(shown.len(), 4);
        assert_eq!(shown[2], Message::user("second"));
        assert_eq!(shown[3], Message::assistant(FALLBACK_ANSWER));
        assert_eq!(*session.session_usage(), usage_before);
        assert_eq!(session.latest_usage().copied(), latest_before);
        assert_eq!(session.state(), InteractionState::Idle);
    }

    #[tokio::test]
    async fn test_blank_question_is_ignored() {
        let provider = Arc::new(ScriptedProvider::new());
        let controller = controller(provider.clone());
        let mut session = session();

        assert_eq!(controller.ask(&mut session, "   \n").await, TurnOutcome::Ignored);
        assert!(session.displayable_history().is_empty());
        assert!(provider.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_context_still_answers() {
        let provider = Arc::new(ScriptedProvider::new().with_reply("I have no documents.", 30, 6));
        let controller = controller(provider.clone());
        let mut session = session();

        let outcome = controller.ask(&mut session, "What documents do you know?").await;
        assert!(matches!(outcome, TurnOutcome::Answered { .. }));
        assert_eq!(provider.requests().await[0].messages[1].content, CONTEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_reply("too late", 1, 1)
                .with_delay(Duration::from_secs(120)),
        );
        let controller = InteractionController::new(
            provider,
            GenerationSettings {
                timeout: Duration::from_secs(5),
                ..Default::default()
            },
        );
        let mut session = session();

        let outcome = controller.ask(&mut session, "slow?").await;
        assert!(matches!(
            outcome,
            TurnOutcome::Failed { error: RemoteServiceError::Timeout { secs: 5 }, .. }
        ));
        assert_eq!(session.session_usage().total_tokens, 0);
        assert_eq!(session.displayable_history().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_is_a_failure() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_reply("never", 1, 1)
                .with_delay(Duration::from_secs(30)),
        );
        let controller = controller(provider);
        let mut session = session();
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let outcome = controller.ask_cancellable(&mut session, "cancel me", &cancel).await;
        assert!(matches!(
            outcome,
            TurnOutcome::Failed { error: RemoteServiceError::Cancelled, .. }
        ));
        assert_eq!(session.displayable_history()[1], Message::assistant(FALLBACK_ANSWER));
    }

    #[tokio::test]
    async fn test_dropped_request_is_closed_on_next_question() {
        let provider = Arc::new(ScriptedProvider::new().with_reply("Answer.", 3, 2));
        let controller = controller(provider);
        let mut session = session();

        // Simulate a request future dropped mid-flight.
        session.conversation_mut().append_user("abandoned").unwrap();
        session.set_state(InteractionState::AwaitingResponse);

        let outcome = controller.ask(&mut session, "next").await;
        assert!(matches!(outcome, TurnOutcome::Answered { .. }));

        let contents: Vec<&str> = session
            .displayable_history()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["abandoned", FALLBACK_ANSWER, "next", "Answer."]);
    }

    #[tokio::test]
    async fn test_window_limits_submitted_history_only() {
        let provider = Arc::new(ScriptedProvider::new());
        let controller = controller(provider.clone()).with_window(HistoryWindow {
            max_messages: Some(3),
            max_estimated_tokens: None,
        });
        let mut session = session();

        for q in ["a", "b", "c"] {
            controller.ask(&mut session, q).await;
        }

        assert_eq!(session.displayable_history().len(), 6);
        let last = provider.requests().await.pop().unwrap();
        assert_eq!(last.messages.len(), 2 + 3);
        assert_eq!(last.messages[2], Message::user("b"));
    }
}
