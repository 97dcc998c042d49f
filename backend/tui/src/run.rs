//! Terminal lifecycle and the event loop.

use std::io::{self, Stdout};

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::app::AppState;
use crate::input::{handle_key_event, UiAction};
use crate::render::draw_ui;
use crate::worker::WorkerHandle;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the page until the user quits. The terminal is restored even when the
/// loop fails.
pub async fn run_app(mut state: AppState, mut worker: WorkerHandle) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut state, &mut worker).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    worker.cancel();
    worker.shutdown().await;
    info!("TUI closed");
    result
}

async fn event_loop(
    terminal: &mut Term,
    state: &mut AppState,
    worker: &mut WorkerHandle,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();

    while !state.should_quit {
        terminal.draw(|f| draw_ui(f, state))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key_event(key, state) {
                        Some(UiAction::Submit(question)) => worker.submit(question).await?,
                        Some(UiAction::Cancel) => worker.cancel(),
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            snapshot = worker.snapshots.recv() => match snapshot {
                Some(snapshot) => state.apply(snapshot),
                None => {
                    warn!("Chat worker ended unexpectedly");
                    break;
                }
            },
        }
    }
    Ok(())
}
