//! Git checkout of the documentation source into a scoped temp directory.

use std::path::Path;

use tempfile::TempDir;
use tokio::process::Command;
use tracing::{info, instrument};

use docsnap_shared::{DocSnapError, Result};

/// A shallow clone living in a temporary directory.
///
/// The directory and everything in it is removed when the `Checkout` is dropped.
#[derive(Debug)]
pub struct Checkout {
    dir: TempDir,
}

impl Checkout {
    /// Root of the working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Shallow-clone `repo_url` at `reference` (branch or tag).
///
/// Fails with [`DocSnapError::Acquire`] if git cannot be started or exits
/// non-zero; git's stderr is included in the message. The temp directory is
/// removed on failure as well.
#[instrument(skip_all, fields(repo_url = %repo_url, reference = %reference))]
pub async fn clone_checkout(repo_url: &str, reference: &str) -> Result<Checkout> {
    if reference.is_empty() || reference.starts_with('-') {
        return Err(DocSnapError::validation(format!(
            "invalid git reference '{reference}'"
        )));
    }

    let dir = tempfile::Builder::new()
        .prefix("docsnap-")
        .tempdir()
        .map_err(|e| DocSnapError::io(std::env::temp_dir(), e))?;

    info!(path = %dir.path().display(), "cloning documentation source");

    let output = Command::new("git")
        .arg("clone")
        .arg("--quiet")
        .arg("--depth")
        .arg("1")
        .arg("--branch")
        .arg(reference)
        .arg("--")
        .arg(repo_url)
        .arg(dir.path())
        .output()
        .await
        .map_err(|e| DocSnapError::Acquire(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DocSnapError::Acquire(format!(
            "git clone of {repo_url} at '{reference}' failed ({}): {}",
            output.status,
            stderr.trim()
        )));
    }

    info!(repo_url, reference, path = %dir.path().display(), "checkout ready");

    Ok(Checkout { dir })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_option_like_reference() {
        let err = clone_checkout("https://example.invalid/repo.git", "--upload-pack=evil")
            .await
            .unwrap_err();
        assert!(matches!(err, DocSnapError::Validation { .. }));
    }

    #[tokio::test]
    async fn missing_repository_is_an_acquire_error() {
        let missing = std::env::temp_dir().join(format!("docsnap-no-repo-{}", uuid::Uuid::now_v7()));

        let err = clone_checkout(&missing.to_string_lossy(), "main")
            .await
            .unwrap_err();
        assert!(matches!(err, DocSnapError::Acquire(_)));
    }
}
