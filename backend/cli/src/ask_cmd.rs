//! `docchat ask`: one question, one answer, printed to stdout.

use anyhow::Result;

use docchat_chat::TurnOutcome;

use crate::bootstrap::Startup;
use crate::terminal_output::{note_info, note_warn};

pub async fn run(startup: Startup, question: &str) -> Result<()> {
    for error in &startup.loaded.errors {
        note_warn(&error.to_string());
    }

    let mut session = startup.new_session();
    match startup.controller.ask(&mut session, question).await {
        TurnOutcome::Ignored => {
            note_warn("The question is empty; nothing was sent.");
            Ok(())
        }
        TurnOutcome::Answered { answer, usage } => {
            println!("{answer}");
            note_info(&format!(
                "{} prompt + {} completion = {} tokens, cost ${:.6}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens, usage.cost
            ));
            Ok(())
        }
        TurnOutcome::Failed { fallback, error } => {
            println!("{fallback}");
            anyhow::bail!("Question failed: {error}")
        }
    }
}
