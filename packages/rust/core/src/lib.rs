//! Snapshot pipeline for versioned documentation trees.
//!
//! This crate ties together version discovery, bundle assembly and index
//! rendering into one run (`build_snapshots`), plus the git checkout used when
//! the source tree has to be fetched first (`build_from_repo`).

pub mod acquire;
pub mod assembler;
pub mod index;
pub mod pipeline;

pub use acquire::{Checkout, clone_checkout};
pub use assembler::{BundleMeta, assemble_bundle, prune_stale_bundles};
pub use index::{IndexReport, build_index, list_bundles};
pub use pipeline::{
    BuildReport, ProgressReporter, RepoSource, SilentProgress, build_from_checkout, build_from_repo,
    build_snapshots,
};
