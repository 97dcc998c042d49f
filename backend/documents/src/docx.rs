//! DOCX paragraph extraction.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`.
//! Paragraphs (`<w:p>`) are emitted in document order, each one the
//! concatenation of its text runs (`<w:t>`), joined with newlines.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use docchat_core::FileReadError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const BODY_ENTRY: &str = "word/document.xml";

/// Self-closing (empty) paragraphs or paragraphs with a body.
static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>").unwrap()
});

/// Text runs, tabs, and line breaks inside a paragraph. An empty self-closing
/// `<w:t/>` is matched first so it cannot open a text run.
static RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)<w:t(?:\s[^>]*)?/>|<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab(?:\s[^>]*)?/>|<w:(?:br|cr)(?:\s[^>]*)?/>",
    )
    .unwrap()
});

/// Paragraph properties; may hold tab-stop definitions that are not text.
static PROPERTIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:pPr(?:\s[^>]*)?>.*?</w:pPr>").unwrap());

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(amp|lt|gt|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);").unwrap());

/// Extract paragraph text from a `.docx` file.
pub fn extract_text(path: &Path) -> Result<String, FileReadError> {
    let docx_error = |message: String| FileReadError::Docx {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|source| FileReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| docx_error(format!("not a zip archive: {e}")))?;
    let mut entry = archive
        .by_name(BODY_ENTRY)
        .map_err(|e| docx_error(format!("missing {BODY_ENTRY}: {e}")))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| docx_error(format!("failed to read {BODY_ENTRY}: {e}")))?;

    Ok(paragraphs_from_xml(&xml).join("\n"))
}

/// Split a WordprocessingML body into plain-text paragraphs.
pub fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    PARAGRAPH_RE
        .captures_iter(xml)
        .map(|para| match para.get(1) {
            Some(body) => paragraph_text(body.as_str()),
            None => String::new(),
        })
        .collect()
}

fn paragraph_text(body: &str) -> String {
    let body = PROPERTIES_RE.replace_all(body, "");
    let mut text = String::new();
    for run in RUN_RE.captures_iter(&body) {
        match run.get(1) {
            Some(t) => text.push_str(&decode_xml_entities(t.as_str())),
            None if run[0].starts_with("<w:tab") => text.push('\t'),
            None if run[0].starts_with("<w:t") => {}
            None => text.push('\n'),
        }
    }
    text
}

fn decode_xml_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_docx(path: &Path, body_xml: &str) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file(BODY_ENTRY, zip::write::FileOptions::default())
            .unwrap();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}</w:body></w:document>"#
        );
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_paragraphs_joined_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.docx");
        write_docx(
            &path,
            r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Enrollment</w:t></w:r></w:p><w:p w:rsidR="00A1"><w:r><w:t xml:space="preserve">Step one </w:t></w:r><w:r><w:t>&amp; two.</w:t></w:r></w:p>"#,
        );

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Enrollment\nStep one & two.");
    }

    #[test]
    fn test_empty_paragraphs_and_tabs() {
        let paragraphs = paragraphs_from_xml(
            r#"<w:p/><w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["".to_string(), "a\tb\nc".to_string()]);
    }

    #[test]
    fn test_empty_self_closing_text_run_is_skipped() {
        let paragraphs = paragraphs_from_xml(
            r#"<w:p><w:r><w:t xml:space="preserve"/></w:r><w:r><w:t>Fees</w:t></w:r></w:p><w:p><w:r><w:t/><w:t>due</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["Fees".to_string(), "due".to_string()]);
    }

    #[test]
    fn test_tab_stops_in_properties_are_not_text() {
        let paragraphs = paragraphs_from_xml(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Fees</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["Fees".to_string()]);
    }

    #[test]
    fn test_numeric_entities_decoded() {
        assert_eq!(decode_xml_entities("caf&#233; &#x20AC;5 &lt;ok&gt;"), "café €5 <ok>");
        assert_eq!(decode_xml_entities("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_not_a_zip_is_docx_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "plain text pretending").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, FileReadError::Docx { .. }));
    }
}
