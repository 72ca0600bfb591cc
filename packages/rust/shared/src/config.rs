//! Project configuration for roadmap-sync.
//!
//! Project config lives at `./roadmap-sync.toml` next to the document.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoadmapError};
use crate::types::{EditMode, SyncOptions};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "roadmap-sync.toml";

/// Default document to edit.
pub const DEFAULT_MARKDOWN_PATH: &str = "preflop_training.md";

/// Default drill directory.
pub const DEFAULT_JSON_DIR: &str = "drills";

/// Default heading that opens the roadmap section.
pub const DEFAULT_HEADING: &str = "## Roadmap";

// ---------------------------------------------------------------------------
// Config file schema (matching roadmap-sync.toml)
// ---------------------------------------------------------------------------

/// Project config, deserialized from TOML. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Document to edit.
    #[serde(default = "default_markdown")]
    pub markdown: PathBuf,

    /// Directory scanned for drill files.
    #[serde(default = "default_json_dir")]
    pub json_dir: PathBuf,

    /// Update mode: `section` or `suffix`.
    #[serde(default)]
    pub mode: EditMode,

    /// Heading line of the roadmap section.
    #[serde(default = "default_heading")]
    pub heading: String,

    /// Git remote used to derive the repository.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Pin the branch instead of asking git.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Branch used when HEAD is detached.
    #[serde(default = "default_fallback_branch")]
    pub fallback_branch: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            markdown: default_markdown(),
            json_dir: default_json_dir(),
            mode: EditMode::default(),
            heading: default_heading(),
            remote: default_remote(),
            branch: None,
            fallback_branch: default_fallback_branch(),
        }
    }
}

fn default_markdown() -> PathBuf {
    DEFAULT_MARKDOWN_PATH.into()
}
fn default_json_dir() -> PathBuf {
    DEFAULT_JSON_DIR.into()
}
fn default_heading() -> String {
    DEFAULT_HEADING.into()
}
fn default_remote() -> String {
    "origin".into()
}
fn default_fallback_branch() -> String {
    "main".into()
}

// ---------------------------------------------------------------------------
// CLI layering
// ---------------------------------------------------------------------------

/// Values given on the command line; `None` leaves the config value in place.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub markdown: Option<PathBuf>,
    pub json_dir: Option<PathBuf>,
    pub mode: Option<EditMode>,
    pub heading: Option<String>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub dry_run: bool,
    pub check: bool,
}

/// Merge CLI overrides over a loaded config into immutable run options.
///
/// An empty `--heading` is rejected here, the same way an empty `heading`
/// key is rejected when the config file loads.
pub fn resolve_options(config: FileConfig, cli: CliOverrides) -> Result<SyncOptions> {
    let heading = match cli.heading {
        Some(heading) if heading.trim().is_empty() => {
            return Err(RoadmapError::argument("--heading must not be empty"));
        }
        Some(heading) => heading,
        None => config.heading,
    };

    Ok(SyncOptions {
        markdown_path: cli.markdown.unwrap_or(config.markdown),
        json_dir: cli.json_dir.unwrap_or(config.json_dir),
        mode: cli.mode.unwrap_or(config.mode),
        heading,
        remote: cli.remote.unwrap_or(config.remote),
        branch: cli.branch.or(config.branch),
        fallback_branch: config.fallback_branch,
        dry_run: cli.dry_run,
        check: cli.check,
    })
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `roadmap-sync.toml` from `dir`. Returns defaults if the file does not exist.
pub fn load_project_config(dir: &Path) -> Result<FileConfig> {
    let path = dir.join(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(FileConfig::default());
    }

    load_config_from(&path)
}

/// Load the config from a specific file path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RoadmapError::configuration(format!("cannot read config {}: {e}", path.display()))
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| {
        RoadmapError::configuration(format!("failed to parse {}: {e}", path.display()))
    })?;

    if config.heading.trim().is_empty() {
        return Err(RoadmapError::configuration(format!(
            "{}: heading must not be empty",
            path.display()
        )));
    }

    tracing::debug!(?path, mode = %config.mode, "loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = FileConfig::default();
        assert_eq!(config.markdown, PathBuf::from("preflop_training.md"));
        assert_eq!(config.json_dir, PathBuf::from("drills"));
        assert_eq!(config.heading, "## Roadmap");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.fallback_branch, "main");
        assert_eq!(config.mode, EditMode::Section);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
json_dir = "content/drills"
mode = "suffix"
"#,
        )
        .expect("parse");
        assert_eq!(config.json_dir, PathBuf::from("content/drills"));
        assert_eq!(config.mode, EditMode::Suffix);
        assert_eq!(config.markdown, PathBuf::from("preflop_training.md"));
        assert!(config.branch.is_none());
    }

    #[test]
    fn cli_overrides_config() {
        let config = FileConfig {
            json_dir: "from-config".into(),
            branch: Some("release".into()),
            ..FileConfig::default()
        };
        let cli = CliOverrides {
            markdown: Some("README.md".into()),
            dry_run: true,
            ..CliOverrides::default()
        };

        let options = resolve_options(config, cli).expect("options");
        assert_eq!(options.markdown_path, PathBuf::from("README.md"));
        assert_eq!(options.json_dir, PathBuf::from("from-config"));
        assert_eq!(options.branch.as_deref(), Some("release"));
        assert!(options.dry_run);
        assert!(!options.check);
    }

    #[test]
    fn empty_cli_heading_is_rejected() {
        let cli = CliOverrides {
            heading: Some("   ".into()),
            ..CliOverrides::default()
        };
        let err = resolve_options(FileConfig::default(), cli).unwrap_err();
        assert!(matches!(err, RoadmapError::Argument { .. }));
        assert!(err.to_string().contains("--heading"));
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_project_config(dir.path()).expect("defaults");
        assert_eq!(config.heading, DEFAULT_HEADING);
    }

    #[test]
    fn invalid_config_is_a_configuration_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "mode = \"sideways\"\n").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, RoadmapError::Configuration { .. }));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
