//! Recursive file walk.
//!
//! [`walk_files`] is a lazy depth-first iterator over every file below a root
//! that satisfies an inclusion predicate. Each call walks the tree afresh.

use std::fs::ReadDir;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use docsnap_shared::{DocSnapError, DocumentFile, Result};

/// Lazy iterator returned by [`walk_files`].
///
/// Yields `Err` for directories that cannot be listed and keeps going with
/// whatever is still pending; callers that want fail-fast behaviour collect
/// into a `Result`.
pub struct WalkFiles<P> {
    /// Directories still being listed, innermost last.
    stack: Vec<(PathBuf, ReadDir)>,
    /// The root itself, opened on the first call to `next`.
    root: Option<PathBuf>,
    include: P,
}

/// Walk every file below `root` for which `include` returns `true`.
///
/// Subdirectories are descended regardless of depth. Symbolic links to
/// directories are not followed; symbolic links to files are yielded when
/// they resolve to a regular file.
pub fn walk_files<P>(root: impl Into<PathBuf>, include: P) -> WalkFiles<P>
where
    P: FnMut(&Path) -> bool,
{
    WalkFiles {
        stack: Vec::new(),
        root: Some(root.into()),
        include,
    }
}

impl<P> Iterator for WalkFiles<P>
where
    P: FnMut(&Path) -> bool,
{
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            match std::fs::read_dir(&root) {
                Ok(entries) => self.stack.push((root, entries)),
                Err(e) => return Some(Err(DocSnapError::io(root, e))),
            }
        }

        loop {
            let (dir, entries) = self.stack.last_mut()?;
            let entry = match entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => return Some(Err(DocSnapError::io(dir.clone(), e))),
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => return Some(Err(DocSnapError::io(path, e))),
            };

            if file_type.is_dir() {
                match std::fs::read_dir(&path) {
                    Ok(children) => {
                        trace!(dir = %path.display(), "descending");
                        self.stack.push((path, children));
                    }
                    Err(e) => return Some(Err(DocSnapError::io(path, e))),
                }
                continue;
            }

            let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
            if is_file && (self.include)(&path) {
                return Some(Ok(path));
            }
        }
    }
}

/// `true` when `path` has extension `ext` (case-sensitive).
///
/// Uses [`Path::extension`], so a bare dotfile such as `.md` has no extension
/// and never matches.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Collect every document with extension `ext` below `dir`.
///
/// Order is whatever the filesystem yields; callers sort. An empty tree
/// produces an empty list.
#[instrument(skip_all, fields(dir = %dir.display(), ext = %ext))]
pub fn collect_documents(dir: &Path, ext: &str) -> Result<Vec<DocumentFile>> {
    let docs = walk_files(dir, |p| has_extension(p, ext))
        .map(|r| r.map(DocumentFile::from))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = docs.len(), "documents collected");
    Ok(docs)
}
