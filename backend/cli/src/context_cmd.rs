//! `docchat context`: what the assistant is told about the folder.

use anyhow::Result;

use docchat_documents::DocumentKind;

use crate::bootstrap::Startup;
use crate::terminal_output::{note_info, note_warn, render_table, Column};

pub fn run(startup: &Startup) -> Result<()> {
    let documents = &startup.loaded.documents;
    if documents.is_empty() {
        note_warn("No documents found; the context holds only its header.");
    } else {
        let columns = [
            Column::left("Document"),
            Column::left("Kind"),
            Column::right("Chars"),
            Column::right("Summary"),
        ];
        let rows: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| {
                vec![
                    doc.name.clone(),
                    kind_label(doc.kind).to_string(),
                    doc.raw_text.chars().count().to_string(),
                    doc.summary.chars().count().to_string(),
                ]
            })
            .collect();
        print!("{}", render_table(&columns, &rows));
        println!();
    }

    for error in &startup.loaded.errors {
        note_warn(&error.to_string());
    }

    print!("{}", startup.context);
    note_info(&format!(
        "{} characters of context from {} document(s)",
        startup.context.chars().count(),
        documents.len()
    ));
    Ok(())
}

fn kind_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Text => "text",
        DocumentKind::PdfLike => "pdf",
        DocumentKind::StructuredDocument => "docx",
        DocumentKind::Unsupported => "unsupported",
    }
}
