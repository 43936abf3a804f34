//! CLI definition, tracing setup, and the build command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use docsnap_core::{
    BuildReport, BundleMeta, ProgressReporter, RepoSource, build_from_repo, build_snapshots,
};
use docsnap_shared::{AppConfig, BuildConfig, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docsnap — one flattened text bundle per documentation version.
#[derive(Parser)]
#[command(
    name = "docsnap",
    version,
    about = "Build one text bundle per documented version plus an index page linking them.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Branch or tag of the documentation repository to snapshot [default: from config, "main"].
    pub reference: Option<String>,

    /// Use a local directory of version-v* folders instead of cloning.
    #[arg(long, value_name = "DIR", conflicts_with = "reference")]
    pub source: Option<PathBuf>,

    /// Output directory for bundles and the index page.
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Config file to use instead of ~/.docsnap/docsnap.toml.
    #[arg(long, value_name = "FILE", env = "DOCSNAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Delete bundles left over from versions no longer in the source.
    #[arg(long)]
    pub prune: bool,

    /// Print the build report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write a default config file to ~/.docsnap/docsnap.toml and exit.
    #[arg(long, exclusive = true)]
    pub init_config: bool,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub show_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docsnap=info",
        1 => "docsnap=debug",
        _ => "docsnap=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if cli.init_config {
        let path = init_config()?;
        println!("Config initialized at: {}", path.display());
        return Ok(());
    }

    let mut app = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    apply_overrides(&mut app, &cli);

    if cli.show_config {
        println!("{}", toml::to_string_pretty(&app)?);
        return Ok(());
    }

    let reporter = CliProgress::new();
    let result = match &cli.source {
        Some(tree) => {
            info!(source = %tree.display(), "building from local tree");
            let config = BuildConfig::from_app(&app, tree);
            build_snapshots(&config, &reporter)
        }
        None => {
            let source = RepoSource {
                repo_url: app.source.repo_url.clone(),
                reference: app.source.reference.clone(),
            };
            info!(
                repo_url = %source.repo_url,
                reference = %source.reference,
                "building from repository"
            );
            let config = BuildConfig::from_app(&app, &app.source.docs_dir);
            build_from_repo(&source, &config, &reporter).await
        }
    };
    reporter.finish();

    let report = result?;
    print_report(&report, cli.json)
}

/// Fold command-line flags into the loaded config.
fn apply_overrides(app: &mut AppConfig, cli: &Cli) {
    if let Some(reference) = &cli.reference {
        app.source.reference = reference.clone();
    }
    if let Some(out) = &cli.out {
        app.output.dir = out.to_string_lossy().into_owned();
    }
    if cli.prune {
        app.output.prune_stale = true;
    }
}

fn print_report(report: &BuildReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!();
    println!("  Snapshots built!");
    for bundle in &report.bundles {
        println!(
            "  {:<28} {:>4} docs  {:>9} bytes  {}",
            bundle.artifact.filename,
            bundle.document_count,
            bundle.artifact.size_bytes,
            &bundle.artifact.sha256[..12]
        );
    }
    for name in &report.pruned {
        println!("  pruned {name}");
    }
    println!(
        "  Index:  {} ({} entries)",
        report.index.path.display(),
        report.index.entries.len()
    );
    println!("  Time:   {:.1}s", report.elapsed_ms as f64 / 1000.0);
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn bundle_written(&self, bundle: &BundleMeta, current: usize, total: usize) {
        self.spinner.set_message(format!(
            "Bundled [{current}/{total}] {}",
            bundle.artifact.filename
        ));
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_zero_or_one_reference() {
        assert!(Cli::try_parse_from(["docsnap"]).unwrap().reference.is_none());
        let cli = Cli::try_parse_from(["docsnap", "v13.0.0"]).unwrap();
        assert_eq!(cli.reference.as_deref(), Some("v13.0.0"));
        assert!(Cli::try_parse_from(["docsnap", "main", "extra"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from(["docsnap", "release-1", "--out", "/tmp/snap", "--prune"]).unwrap();
        let mut app = AppConfig::default();
        apply_overrides(&mut app, &cli);

        assert_eq!(app.source.reference, "release-1");
        assert_eq!(app.output.dir, "/tmp/snap");
        assert!(app.output.prune_stale);
    }

    #[test]
    fn source_conflicts_with_reference() {
        assert!(Cli::try_parse_from(["docsnap", "main", "--source", "docs"]).is_err());
    }
}
