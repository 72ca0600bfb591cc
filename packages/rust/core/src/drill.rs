//! Drill file parsing.
//!
//! A drill file is a JSON object with two required string fields:
//!
//! ```json
//! { "name": "1. Open Raise", "description": "Raise to 2.5bb." }
//! ```
//!
//! Any other field is ignored.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use roadmapsync_shared::{Result, RoadmapError};

/// The two fields read from a drill file, both trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillFields {
    pub name: String,
    pub description: String,
}

/// Read and parse one drill file.
///
/// `relative_path` is only used in error messages.
pub async fn read_drill(path: &Path, relative_path: &str) -> Result<DrillFields> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RoadmapError::Read {
            path: relative_path.to_string(),
            source,
        })?;

    let fields = parse_drill(&content, relative_path)?;
    debug!(path = relative_path, name = %fields.name, "parsed drill");
    Ok(fields)
}

/// Parse drill JSON text.
pub fn parse_drill(content: &str, relative_path: &str) -> Result<DrillFields> {
    let value: Value = serde_json::from_str(content).map_err(|e| RoadmapError::Parse {
        path: relative_path.to_string(),
        message: e.to_string(),
    })?;

    let Value::Object(map) = value else {
        return Err(RoadmapError::schema(
            relative_path,
            "top-level value must be a JSON object",
        ));
    };

    let field = |key: &str| -> Result<String> {
        match map.get(key) {
            None => Err(RoadmapError::schema(
                relative_path,
                format!("missing required field \"{key}\""),
            )),
            Some(Value::String(s)) if s.trim().is_empty() => Err(RoadmapError::schema(
                relative_path,
                format!("field \"{key}\" must not be empty"),
            )),
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(_) => Err(RoadmapError::schema(
                relative_path,
                format!("field \"{key}\" must be a string"),
            )),
        }
    };

    Ok(DrillFields {
        name: field("name")?,
        description: field("description")?,
    })
}

/// Leading integer run of the file's base name (`basics/02-fold.json` -> 2).
///
/// Runs too long for `u64` saturate so they still rank after shorter numbers.
pub fn order_prefix(relative_path: &str) -> Option<u64> {
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    let digits: String = file_name.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
