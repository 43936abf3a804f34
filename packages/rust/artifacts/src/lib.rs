//! Rendering of the files docsnap writes.
//!
//! - [`render_bundle`] — the version-tagged envelope around a version's docs
//! - [`render_index`] — the navigation page linking every bundle, newest first
//! - [`ArtifactMeta`] — size and checksum of a written artifact

pub mod bundle;
pub mod index;
pub mod meta;

pub use bundle::{BUNDLE_CLOSE_TAG, BUNDLE_TAG, BUNDLE_VERSION_ATTR, open_tag, render_bundle};
pub use index::{INDEX_TITLE, IndexEntry, render_index, sort_newest_first};
pub use meta::ArtifactMeta;
