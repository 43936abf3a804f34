//! End-to-end snapshot pipeline: source tree → discovery → bundles → index.

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument, warn};

use docsnap_discovery::discover_versions;
use docsnap_shared::{BuildConfig, DocSnapError, Result};

use crate::acquire::{Checkout, clone_checkout};
use crate::assembler::{BundleMeta, assemble_bundle, prune_stale_bundles};
use crate::index::{IndexReport, build_index};

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// One entry per version folder, in discovery order.
    pub bundles: Vec<BundleMeta>,
    /// Stale bundles deleted before indexing (empty unless pruning is enabled).
    pub pruned: Vec<String>,
    pub index: IndexReport,
    pub elapsed_ms: u64,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each bundle is written.
    fn bundle_written(&self, bundle: &BundleMeta, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn bundle_written(&self, _bundle: &BundleMeta, _current: usize, _total: usize) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Where to fetch the documentation source from.
#[derive(Debug, Clone)]
pub struct RepoSource {
    pub repo_url: String,
    /// Branch or tag.
    pub reference: String,
}

/// Build every bundle and the index from `config.source_tree`.
///
/// 1. Create the output directory
/// 2. Discover version folders
/// 3. Assemble one bundle per version
/// 4. Prune stale bundles (if enabled)
/// 5. Write the index page
///
/// The first I/O failure ends the run; bundles already written stay on disk.
#[instrument(skip_all, fields(source = %config.source_tree.display(), output = %config.output_dir.display()))]
pub fn build_snapshots(config: &BuildConfig, progress: &dyn ProgressReporter) -> Result<BuildReport> {
    let start = Instant::now();
    config.validate()?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| DocSnapError::io(&config.output_dir, e))?;

    progress.phase("Discovering versions");
    let versions = discover_versions(&config.source_tree)?;
    if versions.is_empty() {
        warn!("no version folders found; index will only list existing bundles");
    }

    let total = versions.len();
    let mut bundles = Vec::with_capacity(total);
    for (i, version) in versions.iter().enumerate() {
        progress.phase(&format!("Bundling {}", version.version_folder));
        let bundle = assemble_bundle(version, &config.output_dir, &config.doc_extension)?;
        progress.bundle_written(&bundle, i + 1, total);
        bundles.push(bundle);
    }

    let pruned = if config.prune_stale {
        progress.phase("Pruning stale bundles");
        let keep: HashSet<String> = bundles
            .iter()
            .map(|b| b.artifact.filename.clone())
            .collect();
        prune_stale_bundles(&config.output_dir, &keep)?
    } else {
        Vec::new()
    };

    progress.phase("Writing index");
    let index = build_index(&config.output_dir, &config.index_file)?;

    let report = BuildReport {
        bundles,
        pruned,
        index,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        bundles = report.bundles.len(),
        pruned = report.pruned.len(),
        elapsed_ms = report.elapsed_ms,
        "snapshot build complete"
    );
    progress.done(&report);

    Ok(report)
}

/// Clone `source`, then build from the checkout.
///
/// `config.source_tree` is taken relative to the checkout root. The checkout
/// is removed when this returns, whether the build succeeded or not.
#[instrument(skip_all, fields(repo_url = %source.repo_url, reference = %source.reference))]
pub async fn build_from_repo(
    source: &RepoSource,
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    config.validate()?;

    progress.phase("Cloning documentation source");
    let checkout = clone_checkout(&source.repo_url, &source.reference).await?;

    build_from_checkout(checkout, config, progress)
}

/// Build from an existing checkout, consuming it.
///
/// `config.source_tree` is resolved against the checkout root. The checkout
/// directory is deleted before this returns, on success and on error.
pub fn build_from_checkout(
    checkout: Checkout,
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let mut local = config.clone();
    local.source_tree = checkout.path().join(&config.source_tree);

    let result = build_snapshots(&local, progress);
    drop(checkout);
    result
}
