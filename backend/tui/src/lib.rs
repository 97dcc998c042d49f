//! Terminal UI for docchat.
//!
//! A single page: title and greeting, example-question triggers, the
//! transcript, a collapsible usage/cost panel, and one input line. The UI only
//! renders snapshots; the session is owned by the background worker.

pub mod app;
pub mod input;
pub mod render;
pub mod run;
pub mod worker;

pub use app::{AppState, UiText};
pub use input::{handle_key_event, UiAction};
pub use render::draw_ui;
pub use run::run_app;
pub use worker::{spawn_worker, TurnSnapshot, WorkerHandle};
