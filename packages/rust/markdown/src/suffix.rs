//! Line-targeted link suffixes.
//!
//! Matching is a whitespace-normalized substring test against the drill's
//! file label, so a document that repeats a label in unrelated prose can get
//! the link on the wrong line. Lines that already carry a markdown link are
//! never touched again.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use roadmapsync_shared::DrillEntry;

use crate::link_markdown;

/// Trailing `(download)`, `(link)`, `([download](...))` or `([link](...))`,
/// with ASCII or full-width parentheses.
static LINK_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*[（(]\s*(?:\[(?:download|link)\]\((?:<[^>]+>|[^)]+)\)|download|link)\s*[)）]\s*$",
    )
    .expect("link suffix regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// For each drill, append a fresh link to the first line mentioning its label.
///
/// Drills with no matching line are skipped.
#[instrument(skip_all, fields(drills = drills.len()))]
pub fn upsert_link_suffixes(document: &str, drills: &[DrillEntry]) -> String {
    let mut lines: Vec<String> = document.split('\n').map(String::from).collect();
    let mut linked = 0usize;

    for drill in drills {
        let label = normalize_spaces(drill.label());
        let Some(idx) = lines.iter().position(|line| is_target_line(line, &label)) else {
            debug!(label = %label, "no line mentions drill, skipping");
            continue;
        };

        let updated = format!("{} {}", strip_link_suffix(&lines[idx]), link_markdown(&drill.url));
        lines[idx] = updated;
        linked += 1;
    }

    debug!(linked, "link suffixes applied");
    lines.join("\n")
}

/// Remove any trailing download/link suffixes from a line.
pub fn strip_link_suffix(line: &str) -> &str {
    let mut base = line;
    while let Some(m) = LINK_SUFFIX_RE.find(base) {
        base = &base[..m.start()];
    }
    base
}

fn normalize_spaces(value: &str) -> String {
    WHITESPACE_RE.replace_all(value, " ").trim().to_string()
}

fn is_target_line(line: &str, label: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("<!--")
        || trimmed.starts_with('>')
        || trimmed.contains("](")
    {
        return false;
    }
    normalize_spaces(line).contains(label)
}
