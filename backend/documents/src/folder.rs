//! Startup scan of the documents folder.

use std::path::{Path, PathBuf};

use docchat_core::FileReadError;
use tracing::{info, warn};

use crate::reader::{Document, DocumentReader};
use crate::summarize::Summarizer;

/// Summarized documents plus every per-file error hit while reading them.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    pub documents: Vec<Document>,
    pub errors: Vec<FileReadError>,
}

/// Read and summarize every regular file directly inside `dir`.
///
/// Files are processed in file-name order. A folder that cannot be listed is
/// reported as an error and yields no documents.
pub fn load_documents(dir: &Path, reader: &DocumentReader, summarizer: &Summarizer) -> LoadedDocuments {
    let mut loaded = LoadedDocuments::default();

    let mut paths: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect(),
        Err(source) => {
            warn!(dir = %dir.display(), error = %source, "Documents folder unavailable");
            loaded.errors.push(FileReadError::MissingFolder {
                path: dir.to_path_buf(),
                source,
            });
            return loaded;
        }
    };
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    for path in paths {
        let read = reader.read(&path);
        if let Some(error) = read.error {
            loaded.errors.push(error);
        }
        loaded.documents.push(read.document.summarized(summarizer));
    }

    info!(
        dir = %dir.display(),
        documents = loaded.documents.len(),
        errors = loaded.errors.len(),
        "Loaded documents"
    );
    loaded
}
