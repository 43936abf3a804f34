//! Index builder.
//!
//! Lists the bundles present in the output directory, orders them newest
//! version first and writes the navigation page next to them.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use docsnap_artifacts::{ArtifactMeta, IndexEntry, render_index, sort_newest_first};
use docsnap_shared::{DocSnapError, Result};

use crate::assembler::write_atomic;

/// Output from a successful index build.
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// Path of the written index page.
    pub path: PathBuf,
    /// Linked bundle file names, in page order.
    pub entries: Vec<String>,
    /// How many of those names carried no parseable version.
    pub unversioned: usize,
    pub artifact: ArtifactMeta,
}

/// Read the bundle entries currently in `output_dir`, sorted newest first.
///
/// Every regular file ending in `.txt` is listed, whether or not this run
/// produced it. Names are first put in ascending order so ties and the
/// unparseable tail come out the same on every run.
pub fn list_bundles(output_dir: &Path) -> Result<Vec<IndexEntry>> {
    let dir_entries = std::fs::read_dir(output_dir).map_err(|e| DocSnapError::io(output_dir, e))?;

    let mut names = Vec::new();
    for entry in dir_entries {
        let entry = entry.map_err(|e| DocSnapError::io(output_dir, e))?;
        let file_type = entry.file_type().map_err(|e| DocSnapError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();

    let mut entries: Vec<IndexEntry> = names
        .iter()
        .filter_map(|name| IndexEntry::from_filename(name))
        .collect();

    for entry in &entries {
        if let Err(e) = &entry.version {
            warn!(file = %entry.filename, error = %e, "bundle name has no valid version, listing it last");
        }
    }

    sort_newest_first(&mut entries);
    Ok(entries)
}

/// Build `<output_dir>/<index_file>` from the bundles found in `output_dir`.
#[instrument(skip_all, fields(output_dir = %output_dir.display(), index_file = %index_file))]
pub fn build_index(output_dir: &Path, index_file: &str) -> Result<IndexReport> {
    let entries = list_bundles(output_dir)?;
    let page = render_index(&entries);

    let path = output_dir.join(index_file);
    write_atomic(&path, &page)?;

    let unversioned = entries.iter().filter(|e| e.version.is_err()).count();
    info!(
        entries = entries.len(),
        unversioned,
        path = %path.display(),
        "index written"
    );

    Ok(IndexReport {
        path,
        entries: entries.into_iter().map(|e| e.filename).collect(),
        unversioned,
        artifact: ArtifactMeta::for_content(index_file, &page),
    })
}
