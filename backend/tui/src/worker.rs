//! Background turn runner.
//!
//! The worker task owns the controller and the session; the UI talks to it over
//! channels and only ever sees snapshots, so a redraw never waits on the
//! network and at most one question is in flight.

use docchat_chat::{ChatSession, InteractionController, SessionUsage, TurnOutcome, UsageRecord};
use docchat_core::Message;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Session state after a turn, as the page needs it.
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    pub transcript: Vec<Message>,
    pub latest_usage: Option<UsageRecord>,
    pub session_usage: SessionUsage,
    pub error: Option<String>,
}

impl TurnSnapshot {
    fn capture(session: &ChatSession, error: Option<String>) -> Self {
        Self {
            transcript: session.displayable_history().to_vec(),
            latest_usage: session.latest_usage().copied(),
            session_usage: *session.session_usage(),
            error,
        }
    }
}

pub struct WorkerHandle {
    questions: mpsc::Sender<String>,
    cancels: mpsc::UnboundedSender<()>,
    pub snapshots: mpsc::Receiver<TurnSnapshot>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    pub async fn submit(&self, question: String) -> anyhow::Result<()> {
        self.questions
            .send(question)
            .await
            .map_err(|_| anyhow::anyhow!("chat worker has stopped"))
    }

    /// Cancel the in-flight question, if any.
    pub fn cancel(&self) {
        let _ = self.cancels.send(());
    }

    /// Close the question channel and wait for the worker to finish.
    pub async fn shutdown(self) {
        drop(self.questions);
        let _ = self.task.await;
    }
}

pub fn spawn_worker(controller: InteractionController, mut session: ChatSession) -> WorkerHandle {
    let (question_tx, mut question_rx) = mpsc::channel::<String>(1);
    let (cancel_tx, mut cancel_rx) = mpsc::unbounded_channel::<()>();
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<TurnSnapshot>(8);

    let task = tokio::spawn(async move {
        while let Some(question) = question_rx.recv().await {
            // Cancels sent while idle belong to an earlier turn.
            while cancel_rx.try_recv().is_ok() {}

            let token = CancellationToken::new();
            let outcome = {
                let ask = controller.ask_cancellable(&mut session, &question, &token);
                tokio::pin!(ask);
                loop {
                    tokio::select! {
                        outcome = &mut ask => break outcome,
                        Some(()) = cancel_rx.recv() => token.cancel(),
                    }
                }
            };

            let error = match outcome {
                TurnOutcome::Failed { error, .. } => Some(error.to_string()),
                TurnOutcome::Answered { .. } | TurnOutcome::Ignored => None,
            };
            if snapshot_tx
                .send(TurnSnapshot::capture(&session, error))
                .await
                .is_err()
            {
                break;
            }
        }
        debug!(session = %session.id(), "Chat worker stopped");
    });

    WorkerHandle {
        questions: question_tx,
        cancels: cancel_tx,
        snapshots: snapshot_rx,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_chat::providers::scripted::ScriptedProvider;
    use docchat_chat::{GenerationSettings, UsageAccountant, FALLBACK_ANSWER};
    use docchat_core::Role;
    use std::sync::Arc;
    use std::time::Duration;

    fn session() -> ChatSession {
        ChatSession::new("Be brief.", "Documents used and their summaries:\n", UsageAccountant::default())
    }

    #[tokio::test]
    async fn test_worker_answers_and_reports_usage() {
        let provider = ScriptedProvider::new().with_reply("Three courses.", 90, 10);
        let controller = InteractionController::new(Arc::new(provider), GenerationSettings::default());
        let mut handle = spawn_worker(controller, session());

        handle.submit("How many courses?".into()).await.unwrap();
        let snapshot = handle.snapshots.recv().await.unwrap();

        assert_eq!(snapshot.transcript.len(), 2);
        assert_eq!(snapshot.transcript[1].role, Role::Assistant);
        assert_eq!(snapshot.transcript[1].content, "Three courses.");
        assert_eq!(snapshot.latest_usage.unwrap().total_tokens, 100);
        assert_eq!(snapshot.session_usage.turns, 1);
        assert!(snapshot.error.is_none());

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_produces_fallback_snapshot() {
        let provider = ScriptedProvider::new()
            .with_reply("too late", 1, 1)
            .with_delay(Duration::from_secs(30));
        let controller = InteractionController::new(Arc::new(provider), GenerationSettings::default());
        let mut handle = spawn_worker(controller, session());

        handle.submit("Slow question".into()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        let snapshot = handle.snapshots.recv().await.unwrap();
        assert_eq!(snapshot.transcript.last().unwrap().content, FALLBACK_ANSWER);
        assert!(snapshot.latest_usage.is_none());
        assert!(snapshot.error.is_some());

        handle.shutdown().await;
    }
}
