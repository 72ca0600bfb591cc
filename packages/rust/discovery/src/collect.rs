//! File collector: recursive listing of drill files under a root directory.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use roadmapsync_shared::{Result, RoadmapError};

/// Extension of drill definition files (matched case-insensitively).
pub const DRILL_EXTENSION: &str = ".json";

/// List every regular file under `root` whose name ends with `extension`.
///
/// Paths are relative to `root` and always use `/` separators. The result is
/// sorted with [`natural_cmp`].
#[instrument(skip_all, fields(root = %root.display()))]
pub fn collect_files(root: &Path, extension: &str) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(RoadmapError::Read {
            path: root.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let extension = extension.to_lowercase();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .unwrap_or(root)
                .display()
                .to_string();
            RoadmapError::Read {
                path,
                source: e.into(),
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if !name.ends_with(&extension) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(to_slash_path(relative));
    }

    files.sort_by(|a, b| natural_cmp(a, b));
    debug!(count = files.len(), "collected drill files");

    Ok(files)
}

/// Join path components with `/` regardless of the host separator.
fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Natural ordering
// ---------------------------------------------------------------------------

/// Case-insensitive comparison that orders digit runs by numeric value, so
/// `2.json` < `10.json`. Strings that only differ in case or zero padding
/// fall back to byte order, which keeps the ordering total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = cmp_numeric(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Compare two digit strings by value without overflowing.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn natural_cmp_orders_numbers_by_value() {
        assert_eq!(natural_cmp("2.json", "10.json"), Ordering::Less);
        assert_eq!(natural_cmp("drill-9", "drill-10"), Ordering::Less);
        assert_eq!(natural_cmp("a/2-x.json", "a/02-x.json"), Ordering::Greater);
        assert_eq!(natural_cmp("Beta.json", "alpha.json"), Ordering::Greater);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn natural_cmp_handles_huge_digit_runs() {
        let big = "123456789012345678901234567890.json";
        assert_eq!(natural_cmp("9.json", big), Ordering::Less);
    }

    #[test]
    fn collects_nested_json_files_with_slash_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("basics/deep")).unwrap();
        fs::write(root.join("10-late.json"), "{}").unwrap();
        fs::write(root.join("2-early.JSON"), "{}").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();
        fs::write(root.join("basics/deep/1-open.json"), "{}").unwrap();

        let files = collect_files(root, DRILL_EXTENSION).unwrap();
        assert_eq!(files, vec!["2-early.JSON", "10-late.json", "basics/deep/1-open.json"]);
    }

    #[test]
    fn directories_named_like_drills_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("odd.json")).unwrap();
        fs::write(dir.path().join("odd.json/inner.json"), "{}").unwrap();

        let files = collect_files(dir.path(), DRILL_EXTENSION).unwrap();
        assert_eq!(files, vec!["odd.json/inner.json"]);
    }

    #[test]
    fn missing_root_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = collect_files(&dir.path().join("missing"), DRILL_EXTENSION).unwrap_err();
        assert!(matches!(err, RoadmapError::Read { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
