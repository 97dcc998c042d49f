//! Document ingestion for docchat.
//!
//! Reads a folder of `.txt`, `.pdf`, and `.docx` files, reduces each one to a
//! short synopsis, and assembles the bounded system context sent with every
//! chat request.

pub mod context;
pub mod docx;
pub mod folder;
pub mod kind;
pub mod pdf;
pub mod reader;
pub mod summarize;

pub use context::{ContextBuilder, ContextTruncation, CONTEXT_HEADER, DEFAULT_CONTEXT_CHAR_BUDGET};
pub use folder::{load_documents, LoadedDocuments};
pub use kind::DocumentKind;
pub use reader::{Document, DocumentRead, DocumentReader};
pub use summarize::{Summarizer, DEFAULT_SUMMARY_SENTENCES};
