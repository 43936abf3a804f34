//! Core domain types for documentation snapshots.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix shared by version folders and the bundles produced from them.
pub const VERSION_PREFIX: &str = "version-v";

/// Extension (without the dot) of every bundle written to the output directory.
pub const BUNDLE_EXTENSION: &str = "txt";

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// A three-component numeric version (`major.minor.patch`).
///
/// Ordering compares major first, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Why a dotted label could not be read as a [`Version`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("version '{label}' has {found} components, expected 3")]
    ComponentCount { label: String, found: usize },

    #[error("version '{label}' has non-numeric component '{component}'")]
    InvalidComponent { label: String, component: String },
}

/// Parse a dotted `major.minor.patch` label.
///
/// Every component must be a non-empty run of ASCII digits that fits in a
/// `u32`; signs, whitespace and pre-release suffixes are rejected.
pub fn parse_version(label: &str) -> Result<Version, VersionParseError> {
    let parts: Vec<&str> = label.split('.').collect();
    if parts.len() != 3 {
        return Err(VersionParseError::ComponentCount {
            label: label.to_string(),
            found: parts.len(),
        });
    }

    let component = |raw: &str| -> Result<u32, VersionParseError> {
        let invalid = || VersionParseError::InvalidComponent {
            label: label.to_string(),
            component: raw.to_string(),
        };
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        raw.parse::<u32>().map_err(|_| invalid())
    };

    Ok(Version {
        major: component(parts[0])?,
        minor: component(parts[1])?,
        patch: component(parts[2])?,
    })
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

// ---------------------------------------------------------------------------
// VersionDirectory
// ---------------------------------------------------------------------------

/// A version folder found under the source tree (e.g. `version-v13.0.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDirectory {
    /// Full path to the folder.
    pub path: PathBuf,
    /// The folder name verbatim (`version-v13.0.0`).
    pub version_folder: String,
    /// The folder name without [`VERSION_PREFIX`] (`13.0.0`).
    pub version: String,
}

impl VersionDirectory {
    /// Name of the bundle produced for this version.
    pub fn bundle_filename(&self) -> String {
        bundle_filename(&self.version_folder)
    }
}

/// `<version_folder>.txt`
pub fn bundle_filename(version_folder: &str) -> String {
    format!("{version_folder}.{BUNDLE_EXTENSION}")
}

// ---------------------------------------------------------------------------
// DocumentFile
// ---------------------------------------------------------------------------

/// A qualifying document inside a version folder. Content is read at assembly time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentFile(pub PathBuf);

impl DocumentFile {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for DocumentFile {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}
