//! Per-file text extraction.
//!
//! Dispatches once on [`DocumentKind`] and never fails past its boundary:
//! a read error is returned alongside a document with empty text.

use std::path::Path;

use docchat_core::FileReadError;
use tracing::{debug, warn};

use crate::kind::DocumentKind;
use crate::summarize::Summarizer;
use crate::{docx, pdf};

/// A file found in the documents folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub raw_text: String,
    pub summary: String,
}

impl Document {
    /// Fill in the synopsis from the extracted text.
    pub fn summarized(mut self, summarizer: &Summarizer) -> Self {
        self.summary = summarizer.summarize(&self.raw_text);
        self
    }
}

/// Outcome of reading one file: always a document, plus the error if any.
#[derive(Debug)]
pub struct DocumentRead {
    pub document: Document,
    pub error: Option<FileReadError>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentReader;

impl DocumentReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a file into a [`Document`]; `name` is always the file name.
    pub fn read(&self, path: &Path) -> DocumentRead {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let kind = DocumentKind::from_path(path);

        let (raw_text, error) = match extract(kind, path) {
            Ok(text) => {
                debug!(document = %name, ?kind, chars = text.chars().count(), "Read document");
                (text, None)
            }
            Err(e) => {
                warn!(document = %name, error = %e, "Failed to read document");
                (String::new(), Some(e))
            }
        };

        DocumentRead {
            document: Document {
                name,
                kind,
                raw_text,
                summary: String::new(),
            },
            error,
        }
    }
}

fn extract(kind: DocumentKind, path: &Path) -> Result<String, FileReadError> {
    match kind {
        DocumentKind::Text => read_text(path),
        DocumentKind::PdfLike => pdf::extract_text(path),
        DocumentKind::StructuredDocument => docx::extract_text(path),
        DocumentKind::Unsupported => Ok(String::new()),
    }
}

fn read_text(path: &Path) -> Result<String, FileReadError> {
    let bytes = std::fs::read(path).map_err(|source| FileReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| FileReadError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}
