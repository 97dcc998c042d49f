use std::path::PathBuf;

use thiserror::Error;

/// Failure while extracting text from a single document.
///
/// Always recoverable: the document degrades to empty content and startup
/// continues with the remaining files.
#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },

    #[error("failed to parse PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("failed to parse DOCX {path}: {message}")]
    Docx { path: PathBuf, message: String },

    #[error("documents folder {path} could not be listed: {source}")]
    MissingFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileReadError {
    /// Path of the file (or folder) the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            FileReadError::Io { path, .. }
            | FileReadError::InvalidUtf8 { path }
            | FileReadError::Pdf { path, .. }
            | FileReadError::Docx { path, .. }
            | FileReadError::MissingFolder { path, .. } => path,
        }
    }
}

/// Failure of a single call to the remote chat completion service.
///
/// Recoverable per question: the caller shows a fallback answer and no usage
/// is recorded.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteServiceError {
    #[error("chat provider is not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP request to {provider} failed: {message}")]
    Http { provider: String, message: String },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode {provider} response: {message}")]
    Decode { provider: String, message: String },

    #[error("{provider} returned no choices")]
    EmptyResponse { provider: String },

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("request was cancelled")]
    Cancelled,
}
