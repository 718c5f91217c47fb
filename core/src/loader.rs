//! Reads a folder of plain-text files into [`Document`]s.
//!
//! This is the only part of the crate that touches the filesystem; the engine
//! itself only ever sees the resulting list.

use crate::index::Document;
use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// File extension to keep, without the dot. Empty keeps every file.
    pub extension: String,
    pub recursive: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { extension: "txt".to_string(), recursive: false }
    }
}

impl LoaderOptions {
    fn accepts(&self, path: &Path) -> bool {
        if self.extension.is_empty() {
            return true;
        }
        path.extension().and_then(|s| s.to_str()) == Some(self.extension.as_str())
    }
}

/// Load matching files under `dir`, sorted by file name.
///
/// Files that cannot be read as UTF-8 text are skipped with a warning. Documents are
/// named by their path relative to `dir`, which is the bare file name unless
/// `recursive` is set.
pub fn load_documents<P: AsRef<Path>>(dir: P, options: &LoaderOptions) -> Result<Vec<Document>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }
    let max_depth = if options.recursive { usize::MAX } else { 1 };

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                tracing::warn!(%err, "skipping unreadable entry");
                continue;
            }
            Err(err) => return Err(err).with_context(|| format!("reading {}", dir.display())),
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !options.accepts(path) {
            continue;
        }
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable document");
                continue;
            }
        };
        let name = path.strip_prefix(dir).unwrap_or(path).to_string_lossy().into_owned();
        documents.push(Document { name, text });
    }
    tracing::info!(dir = %dir.display(), num_docs = documents.len(), "loaded documents");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_by_extension() {
        let opts = LoaderOptions::default();
        assert!(opts.accepts(Path::new("a/b.txt")));
        assert!(!opts.accepts(Path::new("a/b.md")));
        assert!(!opts.accepts(Path::new("README")));
        let any = LoaderOptions { extension: String::new(), recursive: false };
        assert!(any.accepts(Path::new("README")));
    }
}
