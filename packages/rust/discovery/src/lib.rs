//! Version folder discovery and document collection.
//!
//! A documentation source tree holds one `version-v<major>.<minor>.<patch>`
//! folder per published version. [`discover_versions`] finds those folders and
//! [`collect_documents`] gathers every document beneath one of them, however
//! deeply nested.

mod versions;
mod walk;

pub use versions::{discover_versions, version_from_folder};
pub use walk::{WalkFiles, collect_documents, has_extension, walk_files};
