//! Application configuration for docsnap.
//!
//! User config lives at `~/.docsnap/docsnap.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocSnapError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docsnap.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docsnap";

// ---------------------------------------------------------------------------
// Config structs (matching docsnap.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the versioned documentation comes from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Where and how snapshots are written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Git repository holding the versioned docs.
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Branch or tag checked out when no reference is given on the command line.
    #[serde(default = "default_reference")]
    pub reference: String,

    /// Directory inside the checkout that contains the `version-v*` folders.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repo_url: default_repo_url(),
            reference: default_reference(),
            docs_dir: default_docs_dir(),
        }
    }
}

fn default_repo_url() -> String {
    "https://github.com/facebook/relay.git".into()
}
fn default_reference() -> String {
    "main".into()
}
fn default_docs_dir() -> String {
    "website/versioned_docs".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving bundles and the index page.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// File name of the index page.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Extension (without the dot) of the documents gathered into bundles.
    #[serde(default = "default_doc_extension")]
    pub doc_extension: String,

    /// Delete `version-v*.txt` bundles not produced by the current run.
    #[serde(default)]
    pub prune_stale: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            index_file: default_index_file(),
            doc_extension: default_doc_extension(),
            prune_stale: false,
        }
    }
}

fn default_output_dir() -> String {
    "llms".into()
}
fn default_index_file() -> String {
    "index.html".into()
}
fn default_doc_extension() -> String {
    "md".into()
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration passed into the snapshot pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root containing the `version-v*` folders.
    pub source_tree: PathBuf,
    /// Directory receiving bundles and the index page.
    pub output_dir: PathBuf,
    /// Extension (without the dot) of qualifying documents.
    pub doc_extension: String,
    /// File name of the index page inside `output_dir`.
    pub index_file: String,
    /// Remove bundles left over from earlier runs.
    pub prune_stale: bool,
}

impl BuildConfig {
    /// Build a runtime config for `source_tree`, taking output settings from `config`.
    pub fn from_app(config: &AppConfig, source_tree: impl Into<PathBuf>) -> Self {
        Self {
            source_tree: source_tree.into(),
            output_dir: PathBuf::from(&config.output.dir),
            doc_extension: config.output.doc_extension.clone(),
            index_file: config.output.index_file.clone(),
            prune_stale: config.output.prune_stale,
        }
    }

    /// Reject settings that would produce unusable output.
    pub fn validate(&self) -> Result<()> {
        if self.doc_extension.is_empty() || self.doc_extension.starts_with('.') {
            return Err(DocSnapError::config(format!(
                "doc_extension must be non-empty and given without a leading dot, got '{}'",
                self.doc_extension
            )));
        }
        if self.index_file.is_empty()
            || self.index_file.contains(['/', '\\'])
            || self.index_file.ends_with(".txt")
        {
            return Err(DocSnapError::config(format!(
                "index_file must be a plain file name that does not end in .txt, got '{}'",
                self.index_file
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docsnap/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DocSnapError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docsnap/docsnap.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocSnapError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocSnapError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocSnapError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocSnapError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocSnapError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("repo_url"));
        assert!(toml_str.contains("versioned_docs"));
        assert!(toml_str.contains("index.html"));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let toml_str = r#"
[output]
dir = "/srv/snapshots"
prune_stale = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.output.dir, "/srv/snapshots");
        assert!(config.output.prune_stale);
        assert_eq!(config.output.doc_extension, "md");
        assert_eq!(config.source.reference, "main");
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("docsnap-config-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("docsnap.toml");
        std::fs::write(&path, "[output\ndir = 1").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn build_config_from_app_config() {
        let app = AppConfig::default();
        let build = BuildConfig::from_app(&app, "/tmp/tree");
        assert_eq!(build.source_tree, PathBuf::from("/tmp/tree"));
        assert_eq!(build.output_dir, PathBuf::from("llms"));
        assert_eq!(build.index_file, "index.html");
        assert!(!build.prune_stale);
        assert!(build.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let mut build = BuildConfig::from_app(&AppConfig::default(), "/tmp/tree");
        build.doc_extension = ".md".into();
        assert!(build.validate().is_err());

        let mut build = BuildConfig::from_app(&AppConfig::default(), "/tmp/tree");
        build.index_file = "nested/index.html".into();
        assert!(build.validate().is_err());

        build.index_file = "index.txt".into();
        assert!(build.validate().is_err());
    }
}
