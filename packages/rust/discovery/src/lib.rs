//! Repository and drill-file discovery.
//!
//! Before anything is rendered, roadmap-sync needs two facts from the
//! environment: which hosted repository the working tree belongs to (asked
//! of `git`), and which drill files exist under the drill directory.

mod collect;
mod repo;

pub use collect::{DRILL_EXTENSION, collect_files, natural_cmp};
pub use repo::{GitRunner, RemoteUrl, SystemGit, locate_repo, parse_remote_url};
