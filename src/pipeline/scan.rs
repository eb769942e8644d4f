//! Local bookkeeping: which PDFs still need converting.
//!
//! The converter writes one directory per document
//! (`output_markdown/<stem>/<stem>.md` plus extracted images), so "already
//! converted" means the output directory for a stem exists and contains at
//! least one `.md` file. A directory without any Markdown (an interrupted
//! run, or images only) still counts as pending.

use crate::error::SyncError;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Split of the local input set into pending and already-converted stems.
///
/// Both lists are sorted; the converter decides nothing based on order,
/// but deterministic output makes run logs diffable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Stems with no Markdown output yet.
    pub pending: Vec<String>,
    /// Stems whose output directory already contains a `.md` file.
    pub skipped: Vec<String>,
}

impl ScanOutcome {
    /// Total PDFs present locally.
    pub fn input_files(&self) -> usize {
        self.pending.len() + self.skipped.len()
    }
}

/// Compare the input directory's `*.pdf` stems against the output tree.
pub async fn pending_documents(
    input_dir: &Path,
    output_dir: &Path,
) -> Result<ScanOutcome, SyncError> {
    let stems = pdf_stems(input_dir).await?;
    let converted = converted_stems(output_dir).await?;

    let mut pending = Vec::new();
    let mut skipped = Vec::new();
    for stem in stems {
        if converted.contains(&stem) {
            skipped.push(stem);
        } else {
            pending.push(stem);
        }
    }
    debug!(
        pending = pending.len(),
        skipped = skipped.len(),
        "scanned input directory"
    );
    Ok(ScanOutcome { pending, skipped })
}

/// Stems of every `*.pdf` directly inside `dir`.
async fn pdf_stems(dir: &Path) -> Result<BTreeSet<String>, SyncError> {
    let mut stems = BTreeSet::new();
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| io_err(dir, e))?;
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(dir, e))? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "pdf") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.insert(stem.to_string());
            }
        }
    }
    Ok(stems)
}

/// Names of output subdirectories that contain at least one `.md` file.
///
/// A missing output directory means nothing is converted yet.
async fn converted_stems(dir: &Path) -> Result<BTreeSet<String>, SyncError> {
    let mut converted = BTreeSet::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(converted),
        Err(e) => return Err(io_err(dir, e)),
    };
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(dir, e))? {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if contains_markdown(&path).await? {
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                converted.insert(name.to_string());
            }
        }
    }
    Ok(converted)
}

async fn contains_markdown(dir: &Path) -> Result<bool, SyncError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| io_err(dir, e))?;
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(dir, e))? {
        if entry.path().extension().is_some_and(|ext| ext == "md") {
            return Ok(true);
        }
    }
    Ok(false)
}

fn io_err(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[tokio::test]
    async fn everything_pending_when_output_is_empty() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input_pdfs");
        let output = tmp.path().join("output_markdown");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();
        touch(&input.join("a.pdf"));
        touch(&input.join("b.pdf"));

        let outcome = pending_documents(&input, &output).await.unwrap();
        assert_eq!(outcome.pending, vec!["a", "b"]);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.input_files(), 2);
    }

    #[tokio::test]
    async fn converted_documents_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input_pdfs");
        let output = tmp.path().join("output_markdown");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(output.join("a")).unwrap();
        touch(&input.join("a.pdf"));
        touch(&input.join("b.pdf"));
        touch(&output.join("a").join("a.md"));

        let outcome = pending_documents(&input, &output).await.unwrap();
        assert_eq!(outcome.pending, vec!["b"]);
        assert_eq!(outcome.skipped, vec!["a"]);
    }

    #[tokio::test]
    async fn output_directory_without_markdown_counts_as_pending() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input_pdfs");
        let output = tmp.path().join("output_markdown");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(output.join("a")).unwrap();
        touch(&input.join("a.pdf"));
        // Interrupted run: images extracted, no Markdown written.
        touch(&output.join("a").join("figure_1.png"));

        let outcome = pending_documents(&input, &output).await.unwrap();
        assert_eq!(outcome.pending, vec!["a"]);
        assert!(outcome.skipped.is_empty());
    }

    #[tokio::test]
    async fn missing_output_directory_means_nothing_converted() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input_pdfs");
        fs::create_dir_all(&input).unwrap();
        touch(&input.join("a.pdf"));

        let outcome = pending_documents(&input, &tmp.path().join("missing"))
            .await
            .unwrap();
        assert_eq!(outcome.pending, vec!["a"]);
    }

    #[tokio::test]
    async fn non_pdf_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input_pdfs");
        let output = tmp.path().join("output_markdown");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();
        touch(&input.join("a.pdf"));
        touch(&input.join("notes.txt"));
        touch(&input.join("README"));

        let outcome = pending_documents(&input, &output).await.unwrap();
        assert_eq!(outcome.pending, vec!["a"]);
    }
}
