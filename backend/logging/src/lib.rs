//! Telemetry and structured logging components for docchat.
//!
//! Handles log redaction, console and rolling NDJSON file output, and chat
//! event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ChatEvent, ChatEventLogger, EventLogEntry};
pub use logger::{init_logger, LogOutput};
pub use redact::redact_sensitive_data;
