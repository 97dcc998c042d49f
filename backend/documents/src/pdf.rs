//! PDF text extraction.

use std::path::Path;

use docchat_core::FileReadError;
use tracing::debug;

/// Concatenate the text of every page in page order.
///
/// Pages that yield no text (scanned images, unsupported font encodings) are
/// skipped rather than failing the whole document.
pub fn extract_text(path: &Path) -> Result<String, FileReadError> {
    let document = lopdf::Document::load(path).map_err(|e| FileReadError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut text = String::new();
    for page_number in document.get_pages().into_keys() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) if !page_text.trim().is_empty() => text.push_str(&page_text),
            Ok(_) => debug!(page = page_number, "PDF page has no extractable text"),
            Err(e) => debug!(page = page_number, error = %e, "Skipping unreadable PDF page"),
        }
    }

    Ok(text)
}
