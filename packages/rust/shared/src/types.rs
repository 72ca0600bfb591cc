//! Core domain types for roadmap-sync.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DrillEntry
// ---------------------------------------------------------------------------

/// One parsed drill file plus its computed blob URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillEntry {
    /// Path relative to the drill directory, `/`-separated.
    pub relative_path: String,
    /// Leading integer run of the file's base name, if any.
    pub order: Option<u64>,
    /// Trimmed `name` field.
    pub name: String,
    /// `description` field, may span multiple lines.
    pub description: String,
    /// Browsable blob URL for the file.
    pub url: String,
}

impl DrillEntry {
    /// File base name without its extension, e.g. `01-open` for
    /// `basics/01-open.json`.
    pub fn label(&self) -> &str {
        let file_name = self
            .relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path);
        match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        }
    }
}

// ---------------------------------------------------------------------------
// RepoLocation
// ---------------------------------------------------------------------------

/// Where the drill files live on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// Hosting service host, e.g. `github.com`.
    pub host: String,
    pub owner: String,
    pub repo: String,
    /// Branch used in blob URLs.
    pub branch: String,
}

impl RepoLocation {
    /// `owner/repo` identifier.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

// ---------------------------------------------------------------------------
// EditMode
// ---------------------------------------------------------------------------

/// How the target document is updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Regenerate the roadmap section after its quoted preamble.
    #[default]
    Section,
    /// Append `([link](<url>))` to the first line mentioning each drill.
    Suffix,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section => f.write_str("section"),
            Self::Suffix => f.write_str("suffix"),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncOptions
// ---------------------------------------------------------------------------

/// Fully resolved run options (CLI flags layered over config and defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Document to edit.
    pub markdown_path: PathBuf,
    /// Directory scanned for drill files.
    pub json_dir: PathBuf,
    pub mode: EditMode,
    /// Heading line that opens the roadmap section, e.g. `## Roadmap`.
    pub heading: String,
    /// Git remote queried for the repository URL.
    pub remote: String,
    /// Explicit branch; `None` means ask git.
    pub branch: Option<String>,
    /// Branch used when git reports a detached HEAD.
    pub fallback_branch: String,
    /// Render and report, never write.
    pub dry_run: bool,
    /// Fail instead of writing when the document is stale.
    pub check: bool,
}
