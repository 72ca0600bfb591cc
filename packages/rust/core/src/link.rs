//! Blob URL construction.

use std::path::{Component, Path};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use roadmapsync_shared::{RepoLocation, Result, RoadmapError};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped in a path
/// segment, the same set JavaScript's `encodeURIComponent` leaves alone.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Join the drill directory and a drill's relative path into a
/// repository-relative, `/`-separated path.
///
/// Only normal components of `json_dir` are kept, so `./drills` and
/// `drills/` both become `drills`.
pub fn repo_path(json_dir: &Path, relative_path: &str) -> String {
    json_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .chain(
            relative_path
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .map(String::from),
        )
        .collect::<Vec<_>>()
        .join("/")
}

/// Build `https://<host>/<owner>/<repo>/blob/<branch>/<path>`.
///
/// Each segment of `repo_path` is percent-encoded on its own; `/` inside the
/// branch name is kept as a separator.
pub fn blob_url(location: &RepoLocation, repo_path: &str) -> Result<String> {
    let mut url = Url::parse(&format!("https://{}/", location.host)).map_err(|e| {
        RoadmapError::configuration(format!("invalid repository host {:?}: {e}", location.host))
    })?;

    {
        let mut segments = url.path_segments_mut().map_err(|()| {
            RoadmapError::configuration(format!("cannot build URL for host {:?}", location.host))
        })?;
        segments
            .pop_if_empty()
            .push(&location.owner)
            .push(&location.repo)
            .push("blob")
            .extend(location.branch.split('/'));
    }

    let path = repo_path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    Ok(format!("{}/{path}", url.as_str().trim_end_matches('/')))
}
