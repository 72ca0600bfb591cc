//! Roadmap section regeneration.
//!
//! Layout of the section this module maintains:
//!
//! ```text
//! ## Roadmap
//! > hand-written preamble, kept as is
//! > up to and including the second quote line
//!
//! 1. **Open Raise** ([link](<https://...>))
//!
//!     Raise to 2.5bb.
//!
//! ---
//!
//! 2. **Fold Equity** ([link](<https://...>))
//!
//!     Line one
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use roadmapsync_shared::{DrillEntry, Result, RoadmapError};

use crate::{DESCRIPTION_INDENT, ITEM_BREAK, link_markdown};

/// Matches list-style numbering in front of a drill name: `1. `, `2) `,
/// `3: `, `04 - `, `5 `.
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(?:[.):]|\s*-)?\s+").expect("leading number regex")
});

/// Regenerate the body of the section opened by `heading`.
///
/// Everything through the second `>` line of the section is preserved; the
/// rest of the section is replaced by [`render_roadmap`]. Lines outside the
/// section are untouched.
#[instrument(skip(document, drills), fields(drills = drills.len()))]
pub fn replace_section(document: &str, heading: &str, drills: &[DrillEntry]) -> Result<String> {
    let heading = heading.trim();
    let lines: Vec<&str> = document.split('\n').collect();

    let heading_idx = lines
        .iter()
        .position(|line| line.trim().starts_with(heading))
        .ok_or_else(|| RoadmapError::SectionNotFound {
            heading: heading.to_string(),
        })?;

    let level = heading_level(heading).unwrap_or(0);
    let mut section_end = lines[heading_idx + 1..]
        .iter()
        .position(|line| ends_section(line, level))
        .map_or(lines.len(), |offset| heading_idx + 1 + offset);
    let followed_by_heading = section_end < lines.len();

    // Keep the document's trailing newline outside the regenerated body.
    if !followed_by_heading && section_end > heading_idx + 1 && lines[section_end - 1].is_empty() {
        section_end -= 1;
    }

    let body = &lines[heading_idx + 1..section_end];
    let quote_lines: Vec<usize> = body
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim_start().starts_with('>'))
        .map(|(i, _)| i)
        .take(2)
        .collect();

    let &[_, preamble_last] = quote_lines.as_slice() else {
        return Err(RoadmapError::Preamble {
            heading: heading.to_string(),
            found: quote_lines.len(),
        });
    };

    let mut out: Vec<String> = lines[..=heading_idx + 1 + preamble_last]
        .iter()
        .map(|line| (*line).to_string())
        .collect();

    if !drills.is_empty() {
        out.push(String::new());
        out.extend(render_roadmap(drills));
    }
    if followed_by_heading {
        out.push(String::new());
    }
    out.extend(lines[section_end..].iter().map(|line| (*line).to_string()));

    debug!(
        heading_line = heading_idx + 1,
        replaced_lines = body.len() - preamble_last - 1,
        "roadmap section regenerated"
    );

    Ok(out.join("\n"))
}

/// Render the numbered drill list, one item per drill in the given order.
pub fn render_roadmap(drills: &[DrillEntry]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, drill) in drills.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
            lines.push(ITEM_BREAK.to_string());
            lines.push(String::new());
        }

        lines.push(format!(
            "{}. **{}** {}",
            i + 1,
            strip_leading_number(&drill.name),
            link_markdown(&drill.url)
        ));
        lines.push(String::new());

        for line in drill.description.trim().lines() {
            let line = line.trim_end();
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{DESCRIPTION_INDENT}{line}"));
            }
        }
    }

    lines
}

/// Drop list numbering from a drill name (`"1. Open Raise"` -> `"Open Raise"`).
///
/// Names that are nothing but a number are returned unchanged.
pub fn strip_leading_number(name: &str) -> &str {
    let name = name.trim();
    match LEADING_NUMBER_RE.find(name) {
        Some(m) if m.end() < name.len() => name[m.end()..].trim_start(),
        _ => name,
    }
}

/// ATX heading level of a line (`## x` -> 2), if it is a heading.
///
/// Four or more leading spaces make an indented code line, not a heading.
fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    match trimmed[hashes..].chars().next() {
        None | Some(' ') | Some('\t') => Some(hashes),
        _ => None,
    }
}

/// A heading at the section's own level or above closes the section.
/// Sections opened by a plain-text heading end at any heading.
fn ends_section(line: &str, level: usize) -> bool {
    match heading_level(line) {
        Some(found) => level == 0 || found <= level,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn drill(path: &str, name: &str, description: &str) -> DrillEntry {
        DrillEntry {
            relative_path: path.into(),
            order: None,
            name: name.into(),
            description: description.into(),
            url: format!("https://github.com/acme/poker/blob/main/drills/{path}"),
        }
    }

    fn sample_drills() -> Vec<DrillEntry> {
        vec![
            drill("01-open.json", "1. Open Raise", "Raise to 2.5bb."),
            drill("02-fold.json", "Fold Equity", "Line one\nLine two"),
        ]
    }

    const PREAMBLE_DOC: &str = "\
# Preflop Training

Intro text.

## Roadmap

> Drills are generated from the drills directory.
> Do not edit below this quote.

1. stale entry

## Appendix

Keep me.
";

    #[test]
    fn renders_example_scenario() {
        let rendered = render_roadmap(&sample_drills()).join("\n");
        assert_eq!(
            rendered,
            "\
1. **Open Raise** ([link](<https://github.com/acme/poker/blob/main/drills/01-open.json>))

    Raise to 2.5bb.

---

2. **Fold Equity** ([link](<https://github.com/acme/poker/blob/main/drills/02-fold.json>))

    Line one
    Line two"
        );
    }

    #[test]
    fn replaces_body_after_preamble_and_keeps_following_sections() {
        let updated = replace_section(PREAMBLE_DOC, "## Roadmap", &sample_drills()).unwrap();
        assert_eq!(
            updated,
            "\
# Preflop Training

Intro text.

## Roadmap

> Drills are generated from the drills directory.
> Do not edit below this quote.

1. **Open Raise** ([link](<https://github.com/acme/poker/blob/main/drills/01-open.json>))

    Raise to 2.5bb.

---

2. **Fold Equity** ([link](<https://github.com/acme/poker/blob/main/drills/02-fold.json>))

    Line one
    Line two

## Appendix

Keep me.
"
        );
    }

    #[test]
    fn rerun_is_byte_identical() {
        let drills = vec![
            drill("01-open.json", "Open Raise", "Raise to 2.5bb."),
            drill("02-fold.json", "Fold Equity", "Line one\nLine two"),
            drill("03-3bet.json", "3. Three Bet", "Polarize.\n\nVersus late position."),
        ];
        let once = replace_section(PREAMBLE_DOC, "## Roadmap", &drills).unwrap();
        let twice = replace_section(&once, "## Roadmap", &drills).unwrap();
        assert_eq!(once, twice);
        assert!(once.contains("3. **Three Bet**"));
        assert!(once.contains("    Polarize.\n\n    Versus late position."));
    }

    #[test]
    fn section_at_document_end_keeps_trailing_newline() {
        let doc = "## Roadmap\n> one\n> two\n\n1. old\n";
        let updated = replace_section(doc, "## Roadmap", &sample_drills()[..1]).unwrap();
        assert_eq!(
            updated,
            "## Roadmap\n> one\n> two\n\n1. **Open Raise** ([link](<https://github.com/acme/poker/blob/main/drills/01-open.json>))\n\n    Raise to 2.5bb.\n"
        );
        assert_eq!(replace_section(&updated, "## Roadmap", &sample_drills()[..1]).unwrap(), updated);
    }

    #[test]
    fn zero_drills_leave_only_the_preamble() {
        let updated = replace_section(PREAMBLE_DOC, "## Roadmap", &[]).unwrap();
        assert!(updated.contains("> Do not edit below this quote.\n\n## Appendix"));
        assert!(!updated.contains("stale entry"));

        let doc = "## Roadmap\n> one\n> two\n1. old\n";
        assert_eq!(replace_section(doc, "## Roadmap", &[]).unwrap(), "## Roadmap\n> one\n> two\n");
    }

    #[test]
    fn subheadings_belong_to_the_section() {
        let doc = "## Roadmap\n> a\n> b\n### Old sub\ntext\n# Top\n";
        let updated = replace_section(doc, "## Roadmap", &[]).unwrap();
        assert_eq!(updated, "## Roadmap\n> a\n> b\n\n# Top\n");
    }

    #[test]
    fn missing_heading_is_section_not_found() {
        let err = replace_section("# Title\n\nNo roadmap here.\n", "## Roadmap", &[]).unwrap_err();
        assert!(matches!(err, RoadmapError::SectionNotFound { .. }));
        assert!(err.to_string().contains("section not found"));
    }

    #[test]
    fn single_quote_line_is_preamble_error() {
        let doc = "## Roadmap\n> only one\n\n1. x\n## Next\n> belongs elsewhere\n";
        let err = replace_section(doc, "## Roadmap", &[]).unwrap_err();
        assert!(matches!(err, RoadmapError::Preamble { found: 1, .. }));
    }

    #[test]
    fn strips_list_numbering_from_names() {
        assert_eq!(strip_leading_number("1. Open Raise"), "Open Raise");
        assert_eq!(strip_leading_number("12) Squeeze"), "Squeeze");
        assert_eq!(strip_leading_number("04 - Isolation"), "Isolation");
        assert_eq!(strip_leading_number("3bet Pots"), "3bet Pots");
        assert_eq!(strip_leading_number("1.5bb Sizing"), "1.5bb Sizing");
        assert_eq!(strip_leading_number("  Fold Equity "), "Fold Equity");
        assert_eq!(strip_leading_number("7"), "7");
    }

    #[test]
    fn heading_levels() {
        assert_eq!(heading_level("## Roadmap"), Some(2));
        assert_eq!(heading_level("  ### Sub"), Some(3));
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("plain"), None);
        assert_eq!(heading_level("    ## indented description"), None);
    }
}
