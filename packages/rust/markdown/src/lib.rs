//! Document editing for the roadmap markdown file.
//!
//! Two independent update strategies operate on the document as a sequence of
//! `\n`-separated lines:
//! - [`replace_section`] regenerates the roadmap section below its quoted
//!   preamble.
//! - [`upsert_link_suffixes`] appends a blob link to the first line that
//!   mentions each drill.
//!
//! Both are pure functions; the caller decides whether to write the result.

mod section;
mod suffix;

use roadmapsync_shared::{DrillEntry, EditMode, Result};

pub use section::{render_roadmap, replace_section, strip_leading_number};
pub use suffix::{strip_link_suffix, upsert_link_suffixes};

/// Indentation applied to every description line in the generated roadmap.
pub const DESCRIPTION_INDENT: &str = "    ";

/// Separator emitted between two generated roadmap items.
pub const ITEM_BREAK: &str = "---";

/// Render the markdown link suffix for a blob URL.
///
/// The target is wrapped in `<...>` so characters like `)` cannot end the
/// link early.
pub fn link_markdown(url: &str) -> String {
    format!("([link](<{url}>))")
}

/// Apply the selected edit mode to `document`.
pub fn apply(mode: EditMode, document: &str, heading: &str, drills: &[DrillEntry]) -> Result<String> {
    match mode {
        EditMode::Section => replace_section(document, heading, drills),
        EditMode::Suffix => Ok(upsert_link_suffixes(document, drills)),
    }
}
