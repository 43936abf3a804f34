//! Bundle assembler.
//!
//! Reads every document of one version folder in sorted-path order, wraps the
//! concatenation in the version envelope, and writes `<version_folder>.txt`
//! into the output directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use docsnap_artifacts::{ArtifactMeta, render_bundle};
use docsnap_discovery::collect_documents;
use docsnap_shared::{BUNDLE_EXTENSION, DocSnapError, Result, VERSION_PREFIX, VersionDirectory};

/// Output from a successful bundle assembly.
#[derive(Debug, Clone, Serialize)]
pub struct BundleMeta {
    /// Canonical version label (`13.0.0`).
    pub version: String,
    /// Absolute or output-relative path of the written bundle.
    pub path: PathBuf,
    /// Number of documents concatenated.
    pub document_count: usize,
    /// File name, size and checksum of the bundle.
    pub artifact: ArtifactMeta,
}

/// Assemble and write the bundle for one version folder.
///
/// Documents are ordered by their full path compared byte-wise, so repeated
/// runs over an unchanged tree produce identical files. Any unreadable
/// document (including non UTF-8 content) aborts this bundle before anything
/// is written under its final name.
#[instrument(skip_all, fields(version = %dir.version))]
pub fn assemble_bundle(
    dir: &VersionDirectory,
    output_dir: &Path,
    doc_extension: &str,
) -> Result<BundleMeta> {
    let mut documents = collect_documents(&dir.path, doc_extension)?;
    documents.sort_by(|a, b| a.path().as_os_str().cmp(b.path().as_os_str()));

    let mut contents = Vec::with_capacity(documents.len());
    for doc in &documents {
        let text = std::fs::read_to_string(doc.path())
            .map_err(|e| DocSnapError::io(doc.path(), e))?;
        debug!(path = %doc.path().display(), bytes = text.len(), "read document");
        contents.push(text);
    }

    let bundle = render_bundle(&dir.version, &contents);
    let filename = dir.bundle_filename();
    let target = output_dir.join(&filename);
    write_atomic(&target, &bundle)?;

    info!(
        file = %filename,
        documents = documents.len(),
        bytes = bundle.len(),
        "bundle written"
    );

    Ok(BundleMeta {
        version: dir.version.clone(),
        path: target,
        document_count: documents.len(),
        artifact: ArtifactMeta::for_content(filename, &bundle),
    })
}

/// Delete `version-v*.txt` files in `output_dir` whose names are not in `keep`.
///
/// Returns the removed file names, sorted.
#[instrument(skip_all, fields(output_dir = %output_dir.display(), keep = keep.len()))]
pub fn prune_stale_bundles(output_dir: &Path, keep: &HashSet<String>) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(output_dir).map_err(|e| DocSnapError::io(output_dir, e))?;
    let suffix = format!(".{BUNDLE_EXTENSION}");

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocSnapError::io(output_dir, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_file = entry
            .file_type()
            .map_err(|e| DocSnapError::io(entry.path(), e))?
            .is_file();

        if is_file
            && name.starts_with(VERSION_PREFIX)
            && name.ends_with(&suffix)
            && !keep.contains(&name)
        {
            let path = entry.path();
            std::fs::remove_file(&path).map_err(|e| DocSnapError::io(&path, e))?;
            debug!(file = %name, "removed stale bundle");
            removed.push(name);
        }
    }

    removed.sort();
    if !removed.is_empty() {
        info!(count = removed.len(), "stale bundles pruned");
    }
    Ok(removed)
}

/// Write `content` to `target` via a hidden temp sibling and a rename.
pub(crate) fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DocSnapError::validation(format!("invalid output path {}", target.display())))?;
    let temp = target.with_file_name(format!(".{name}.tmp"));

    if let Err(e) = std::fs::write(&temp, content) {
        let _ = std::fs::remove_file(&temp);
        return Err(DocSnapError::io(&temp, e));
    }

    if let Err(e) = std::fs::rename(&temp, target) {
        let _ = std::fs::remove_file(&temp);
        return Err(DocSnapError::io(target, e));
    }
    debug!(path = %target.display(), bytes = content.len(), "wrote file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
