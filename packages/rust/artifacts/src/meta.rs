//! Checksums for written artifacts.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Metadata for a single artifact file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMeta {
    pub filename: String,
    /// Lowercase hex SHA-256 of the file content.
    pub sha256: String,
    pub size_bytes: usize,
}

impl ArtifactMeta {
    pub fn for_content(filename: impl Into<String>, content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());

        Self {
            filename: filename.into(),
            sha256: format!("{:x}", hasher.finalize()),
            size_bytes: content.len(),
        }
    }
}
