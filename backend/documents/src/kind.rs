use std::path::Path;

/// Extraction capability of a file, decided once from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.txt`, read as UTF-8.
    Text,
    /// `.pdf`, text extracted page by page.
    PdfLike,
    /// `.docx`, paragraph text from the WordprocessingML body.
    StructuredDocument,
    /// Anything else; yields empty content without error.
    Unsupported,
}

impl DocumentKind {
    /// Classify a path by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt") => DocumentKind::Text,
            Some("pdf") => DocumentKind::PdfLike,
            Some("docx") => DocumentKind::StructuredDocument,
            _ => DocumentKind::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_case_insensitive() {
        assert_eq!(DocumentKind::from_path(Path::new("a/notes.TXT")), DocumentKind::Text);
        assert_eq!(DocumentKind::from_path(Path::new("Guide.Pdf")), DocumentKind::PdfLike);
        assert_eq!(
            DocumentKind::from_path(Path::new("rules.DOCX")),
            DocumentKind::StructuredDocument
        );
    }

    #[test]
    fn test_unknown_or_missing_extension_is_unsupported() {
        assert_eq!(DocumentKind::from_path(Path::new("sheet.xlsx")), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_path(Path::new("README")), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_path(Path::new("old.doc")), DocumentKind::Unsupported);
    }
}
