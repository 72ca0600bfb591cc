//! End-to-end sync: locate repo, load drills, rewrite the document.
//!
//! Every failure aborts before the document is written, so a bad drill file
//! never leaves the document half-updated.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument};

use roadmapsync_discovery::{DRILL_EXTENSION, GitRunner, collect_files, locate_repo};
use roadmapsync_shared::{DrillEntry, RepoLocation, Result, RoadmapError, SyncOptions};

use crate::drill::{order_prefix, read_drill};
use crate::link::{blob_url, repo_path};
use crate::rank::rank_drills;

// ---------------------------------------------------------------------------
// Sync result
// ---------------------------------------------------------------------------

/// What happened to the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Rendered text equals the file on disk; nothing written.
    Unchanged,
    /// The document was rewritten.
    Updated,
    /// The document is stale but `--dry-run` or `--check` kept it as is.
    WouldUpdate,
}

/// Result of [`run_sync`].
#[derive(Debug)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    /// Document that was (or would be) edited.
    pub markdown_path: PathBuf,
    /// Number of drills rendered or linked.
    pub drill_count: usize,
    pub location: RepoLocation,
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Drill loading
// ---------------------------------------------------------------------------

/// Collect, parse, link, and rank every drill under `json_dir`.
///
/// Files are read concurrently; the first failure in path order is returned.
#[instrument(skip_all, fields(json_dir = %json_dir.display()))]
pub async fn load_drills(json_dir: &Path, location: &RepoLocation) -> Result<Vec<DrillEntry>> {
    let files = collect_files(json_dir, DRILL_EXTENSION)?;

    let mut handles = Vec::with_capacity(files.len());
    for relative in files {
        let path = json_dir.join(&relative);
        handles.push((
            relative.clone(),
            tokio::spawn(async move { read_drill(&path, &relative).await }),
        ));
    }

    let mut drills = Vec::with_capacity(handles.len());
    for (relative, handle) in handles {
        let fields = handle.await.map_err(|e| RoadmapError::Read {
            path: relative.clone(),
            source: std::io::Error::other(e),
        })??;

        let url = blob_url(location, &repo_path(json_dir, &relative))?;
        drills.push(DrillEntry {
            order: order_prefix(&relative),
            relative_path: relative,
            name: fields.name,
            description: fields.description,
            url,
        });
    }

    rank_drills(&mut drills);
    debug!(count = drills.len(), "drills loaded and ranked");

    Ok(drills)
}

// ---------------------------------------------------------------------------
// Sync pipeline
// ---------------------------------------------------------------------------

/// Run the whole sync for resolved options.
///
/// 1. Resolve repository host, owner/repo, and branch from git
/// 2. Load and rank drill files
/// 3. Render the document with the selected edit mode
/// 4. Write only if the text changed (and neither dry run nor check is set)
#[instrument(skip_all, fields(markdown = %options.markdown_path.display(), mode = %options.mode))]
pub async fn run_sync(options: &SyncOptions, git: &dyn GitRunner) -> Result<SyncReport> {
    let start = Instant::now();

    let location = locate_repo(
        git,
        &options.remote,
        options.branch.as_deref(),
        &options.fallback_branch,
    )?;
    info!(repo = %location.slug(), branch = %location.branch, "repository resolved");

    let drills = load_drills(&options.json_dir, &location).await?;

    let original = tokio::fs::read_to_string(&options.markdown_path)
        .await
        .map_err(|e| RoadmapError::io(&options.markdown_path, e))?;

    let updated = roadmapsync_markdown::apply(options.mode, &original, &options.heading, &drills)?;

    let outcome = if updated == original {
        SyncOutcome::Unchanged
    } else if options.dry_run || options.check {
        SyncOutcome::WouldUpdate
    } else {
        tokio::fs::write(&options.markdown_path, &updated)
            .await
            .map_err(|e| RoadmapError::io(&options.markdown_path, e))?;
        SyncOutcome::Updated
    };

    info!(?outcome, drills = drills.len(), "sync finished");

    Ok(SyncReport {
        outcome,
        markdown_path: options.markdown_path.clone(),
        drill_count: drills.len(),
        location,
        elapsed: start.elapsed(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
