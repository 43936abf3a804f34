//! Scan a source tree for version folders.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use docsnap_shared::{DocSnapError, Result, VERSION_PREFIX, VersionDirectory};

static VERSION_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex"));

/// Extract the canonical version label from a folder name.
///
/// Returns `None` unless the whole name is `version-v` followed by three
/// dot-separated digit runs.
pub fn version_from_folder(name: &str) -> Option<&str> {
    name.strip_prefix(VERSION_PREFIX)
        .filter(|label| VERSION_LABEL_RE.is_match(label))
}

/// List the version folders directly under `root`.
///
/// Files and directories with any other name are skipped without error.
/// The result is sorted by folder name.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn discover_versions(root: &Path) -> Result<Vec<VersionDirectory>> {
    let entries = std::fs::read_dir(root).map_err(|e| DocSnapError::io(root, e))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocSnapError::io(root, e))?;
        let file_type = entry.file_type().map_err(|e| DocSnapError::io(entry.path(), e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!(name = ?entry.file_name(), "skipping non UTF-8 entry");
            continue;
        };

        if !file_type.is_dir() {
            continue;
        }

        match version_from_folder(name) {
            Some(version) => {
                found.push(VersionDirectory {
                    path: entry.path(),
                    version_folder: name.to_string(),
                    version: version.to_string(),
                });
            }
            None => debug!(name, "skipping directory without a version name"),
        }
    }

    found.sort_by(|a, b| a.version_folder.cmp(&b.version_folder));

    info!(count = found.len(), "version folders discovered");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "docsnap-versions-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn folder_names() {
        assert_eq!(version_from_folder("version-v13.0.0"), Some("13.0.0"));
        assert_eq!(version_from_folder("version-v1.2.3"), Some("1.2.3"));
        assert_eq!(version_from_folder("version-vX.Y.Z"), None);
        assert_eq!(version_from_folder("version-v1.2"), None);
        assert_eq!(version_from_folder("version-v1.2.3-rc"), None);
        assert_eq!(version_from_folder("v1.2.3"), None);
        assert_eq!(version_from_folder("old-version-v1.2.3"), None);
    }

    #[test]
    fn discovery_filters_non_matching_entries() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("version-v1.2.3")).unwrap();
        std::fs::create_dir_all(tmp.join("version-vX.Y.Z")).unwrap();
        std::fs::write(tmp.join("README.md"), "# docs").unwrap();

        let found = discover_versions(&tmp).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version, "1.2.3");
        assert_eq!(found[0].version_folder, "version-v1.2.3");
        assert_eq!(found[0].path, tmp.join("version-v1.2.3"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn files_named_like_versions_are_ignored() {
        let tmp = temp_dir();
        std::fs::write(tmp.join("version-v2.0.0"), "not a dir").unwrap();

        assert!(discover_versions(&tmp).unwrap().is_empty());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn results_are_sorted_by_folder_name() {
        let tmp = temp_dir();
        for name in ["version-v2.0.0", "version-v13.0.0", "version-v10.1.0"] {
            std::fs::create_dir_all(tmp.join(name)).unwrap();
        }

        let names: Vec<_> = discover_versions(&tmp)
            .unwrap()
            .into_iter()
            .map(|v| v.version_folder)
            .collect();
        assert_eq!(
            names,
            vec!["version-v10.1.0", "version-v13.0.0", "version-v2.0.0"]
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let tmp = temp_dir();
        let err = discover_versions(&tmp.join("nope")).unwrap_err();
        assert!(matches!(err, DocSnapError::Io { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
