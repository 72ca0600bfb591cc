//! Error types for roadmap-sync.
//!
//! Library crates use [`RoadmapError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` and prints a single line per failure.

use std::path::PathBuf;

/// Top-level error type for all roadmap-sync operations.
///
/// Every variant is fatal: the run aborts before the document is written.
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    /// Version-control environment unusable, remote URL unparseable, or
    /// config file invalid.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Bad command-line invocation.
    #[error("Unknown or incomplete argument: {message}")]
    Argument { message: String },

    /// A drill file (or the drill directory) could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// A drill file is not valid JSON.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// A drill file is valid JSON but misses a required field.
    #[error("invalid drill {path}: {message}")]
    Schema { path: String, message: String },

    /// The document has no roadmap heading.
    #[error("section not found: no line starts with {heading:?}")]
    SectionNotFound { heading: String },

    /// The roadmap section lacks the two leading quote lines.
    #[error("roadmap section under {heading:?} needs at least two '>' lines, found {found}")]
    Preamble { heading: String, found: usize },

    /// Filesystem I/O error on the target document.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RoadmapError>;

impl RoadmapError {
    /// Create a configuration error from any displayable message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Create an argument error from any displayable message.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument {
            message: msg.into(),
        }
    }

    /// Create a schema error for a drill file.
    pub fn schema(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
