//! Structured Logger
//!
//! Wraps `tracing` to provide console output, a daily-rotated NDJSON file,
//! and environment-based level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where human-readable log lines go besides the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Console layer on stderr, keeping stdout free for answers.
    Console,
    /// File only; used while the terminal UI owns the screen.
    FileOnly,
}

/// Initialize the global structured logger.
/// RUST_LOG overrides `level` when set.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str, output: LogOutput) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Rolling file appender: writes NDJSON to `docchat.log.YYYY-MM-DD`
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "docchat.log");

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = (output == LogOutput::Console).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
