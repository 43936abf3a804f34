//! Shared types, error model, and configuration for docsnap.
//!
//! This crate is the foundation depended on by all other docsnap crates.
//! It provides:
//! - [`DocSnapError`] — the unified error type
//! - Domain types ([`Version`], [`VersionDirectory`], [`DocumentFile`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, OutputConfig, SourceConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{DocSnapError, Result};
pub use types::{
    BUNDLE_EXTENSION, DocumentFile, VERSION_PREFIX, Version, VersionDirectory,
    VersionParseError, bundle_filename, parse_version,
};
