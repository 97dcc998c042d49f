//! Keyboard Input Handler
//!
//! Turns crossterm key events into edits of `AppState` and, where the worker
//! has to act, a `UiAction`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Submit(String),
    Cancel,
}

/// Handles a single synchronous keyboard event.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<UiAction> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            None
        }
        KeyCode::Esc => {
            if state.busy {
                Some(UiAction::Cancel)
            } else {
                state.should_quit = true;
                None
            }
        }
        KeyCode::Enter => {
            if state.busy || state.input.trim().is_empty() {
                return None;
            }
            let question = std::mem::take(&mut state.input);
            state.busy = true;
            Some(UiAction::Submit(question))
        }
        KeyCode::F(n) => {
            if state.busy {
                return None;
            }
            let question = state
                .text
                .example_questions
                .get(usize::from(n).checked_sub(1)?)?
                .clone();
            state.busy = true;
            Some(UiAction::Submit(question))
        }
        KeyCode::Tab => {
            state.usage_panel_open = !state.usage_panel_open;
            None
        }
        KeyCode::Up | KeyCode::PageUp => {
            let step = if key.code == KeyCode::Up { 1 } else { 10 };
            state.scroll_back = state.scroll_back.saturating_add(step);
            None
        }
        KeyCode::Down | KeyCode::PageDown => {
            let step = if key.code == KeyCode::Down { 1 } else { 10 };
            state.scroll_back = state.scroll_back.saturating_sub(step);
            None
        }
        KeyCode::Backspace => {
            state.input.pop();
            None
        }
        KeyCode::Char(c) => {
            state.input.push(c);
            None
        }
        _ => None,
    }
}
