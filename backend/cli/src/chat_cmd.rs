//! `docchat chat`: the interactive page.

use anyhow::Result;

use docchat_config::{DocChatConfig, ValidationReport};
use docchat_tui::{run_app, spawn_worker, AppState, UiText};

use crate::bootstrap::Startup;

pub async fn run(startup: Startup, config: &DocChatConfig, report: &ValidationReport) -> Result<()> {
    let mut state = AppState::new(ui_text(config));
    for warning in &report.warnings {
        state.push_notice(warning.to_string());
    }
    for error in &startup.loaded.errors {
        state.push_notice(error.to_string());
    }

    let session = startup.new_session();
    let worker = spawn_worker(startup.controller, session);
    run_app(state, worker).await
}

fn ui_text(config: &DocChatConfig) -> UiText {
    let ui = &config.ui;
    UiText {
        title: ui.title.clone().unwrap_or_default(),
        greeting: ui.greeting.clone().unwrap_or_default(),
        example_questions: ui.example_questions.clone().unwrap_or_default(),
    }
}
