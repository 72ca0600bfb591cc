//! Shared types, error model, and configuration for roadmap-sync.
//!
//! This crate is the foundation depended on by all other roadmap-sync crates.
//! It provides:
//! - [`RoadmapError`]: the unified error type
//! - Domain types ([`DrillEntry`], [`RepoLocation`], [`SyncOptions`], [`EditMode`])
//! - Configuration ([`FileConfig`], config loading and CLI layering)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, CliOverrides, DEFAULT_HEADING, DEFAULT_JSON_DIR, DEFAULT_MARKDOWN_PATH,
    FileConfig, load_config_from, load_project_config, resolve_options,
};
pub use error::{Result, RoadmapError};
pub use types::{DrillEntry, EditMode, RepoLocation, SyncOptions};
