//! Repository locator: derive host, `owner/repo`, and branch from git.

use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use roadmapsync_shared::{RepoLocation, Result, RoadmapError};

// ---------------------------------------------------------------------------
// Git access
// ---------------------------------------------------------------------------

/// Runs read-only git queries and returns trimmed stdout.
pub trait GitRunner {
    /// Run `git <args>`. Spawn failures and non-zero exits are errors.
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// [`GitRunner`] backed by the `git` executable on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    /// Directory git runs in; `None` uses the process working directory.
    pub work_dir: Option<PathBuf>,
}

impl SystemGit {
    pub fn new(work_dir: Option<PathBuf>) -> Self {
        Self { work_dir }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            RoadmapError::configuration(format!("failed to run `git {}`: {e}", args.join(" ")))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RoadmapError::configuration(format!(
                "`git {}` failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Remote URL parsing
// ---------------------------------------------------------------------------

/// Host and repository identifier extracted from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

/// `https://[user@]host/owner/repo[.git]`
static HTTPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:[^@/]+@)?([^/@]+)/([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("https remote regex")
});

/// `user@host:owner/repo[.git]`
static SSH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@([^:/]+):([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("ssh remote regex")
});

/// Parse a remote URL in https or scp-like ssh form.
pub fn parse_remote_url(url: &str) -> Result<RemoteUrl> {
    let url = url.trim();
    let caps = HTTPS_RE
        .captures(url)
        .or_else(|| SSH_RE.captures(url))
        .ok_or_else(|| {
            RoadmapError::configuration(format!("Unsupported origin URL format: {url}"))
        })?;

    Ok(RemoteUrl {
        host: caps[1].to_string(),
        owner: caps[2].to_string(),
        repo: caps[3].to_string(),
    })
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

/// Resolve the repository location for blob links.
///
/// `branch` pins the branch and skips the git query; otherwise
/// `git branch --show-current` is used, with `fallback_branch` for a
/// detached HEAD.
#[instrument(skip(git))]
pub fn locate_repo(
    git: &dyn GitRunner,
    remote: &str,
    branch: Option<&str>,
    fallback_branch: &str,
) -> Result<RepoLocation> {
    let remote_url = git.run(&["remote", "get-url", remote])?;
    let parsed = parse_remote_url(&remote_url)?;

    let branch = match branch {
        Some(b) => b.to_string(),
        None => {
            let current = git.run(&["branch", "--show-current"])?;
            if current.is_empty() {
                debug!(fallback = fallback_branch, "detached HEAD, using fallback branch");
                fallback_branch.to_string()
            } else {
                current
            }
        }
    };

    debug!(host = %parsed.host, owner = %parsed.owner, repo = %parsed.repo, %branch, "repository located");

    Ok(RepoLocation {
        host: parsed.host,
        owner: parsed.owner,
        repo: parsed.repo,
        branch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Canned answers keyed by the joined argument list.
    struct FakeGit(HashMap<String, String>);

    impl FakeGit {
        fn new(answers: &[(&str, &str)]) -> Self {
            Self(
                answers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl GitRunner for FakeGit {
        fn run(&self, args: &[&str]) -> Result<String> {
            match self.0.get(&args.join(" ")) {
                Some(out) => Ok(out.clone()),
                None => Err(RoadmapError::configuration(format!(
                    "`git {}` failed: not a git repository",
                    args.join(" ")
                ))),
            }
        }
    }

    #[test]
    fn parses_https_remote() {
        let parsed = parse_remote_url("https://github.com/acme/poker-drills.git").unwrap();
        assert_eq!(parsed.host, "github.com");
        assert_eq!(parsed.owner, "acme");
        assert_eq!(parsed.repo, "poker-drills");

        let parsed = parse_remote_url("https://github.com/acme/poker-drills").unwrap();
        assert_eq!(parsed.repo, "poker-drills");
    }

    #[test]
    fn parses_ssh_remote() {
        let parsed = parse_remote_url("git@github.com:acme/poker-drills.git").unwrap();
        assert_eq!(parsed.host, "github.com");
        assert_eq!(parsed.owner, "acme");
        assert_eq!(parsed.repo, "poker-drills");
    }

    #[test]
    fn parses_https_remote_with_credentials() {
        let parsed = parse_remote_url("https://x-token@github.com/acme/site.io.git").unwrap();
        assert_eq!(parsed.host, "github.com");
        assert_eq!(parsed.repo, "site.io");
    }

    #[test]
    fn rejects_unsupported_remote() {
        for url in [
            "ftp://github.com/acme/repo",
            "https://github.com/acme",
            "https://github.com/acme/repo/extra",
            "/srv/git/repo.git",
        ] {
            let err = parse_remote_url(url).unwrap_err();
            assert!(matches!(err, RoadmapError::Configuration { .. }), "{url}");
            assert!(err.to_string().contains(url), "{url}");
        }
    }

    #[test]
    fn locate_uses_current_branch() {
        let git = FakeGit::new(&[
            ("remote get-url origin", "git@github.com:acme/poker.git"),
            ("branch --show-current", "feature/ranges"),
        ]);
        let loc = locate_repo(&git, "origin", None, "main").unwrap();
        assert_eq!(loc.slug(), "acme/poker");
        assert_eq!(loc.branch, "feature/ranges");
    }

    #[test]
    fn detached_head_falls_back() {
        let git = FakeGit::new(&[
            ("remote get-url origin", "https://github.com/acme/poker"),
            ("branch --show-current", ""),
        ]);
        let loc = locate_repo(&git, "origin", None, "main").unwrap();
        assert_eq!(loc.branch, "main");
    }

    #[test]
    fn pinned_branch_skips_query() {
        let git = FakeGit::new(&[("remote get-url upstream", "https://github.com/acme/poker")]);
        let loc = locate_repo(&git, "upstream", Some("release"), "main").unwrap();
        assert_eq!(loc.branch, "release");
    }

    #[test]
    fn missing_remote_is_configuration_error() {
        let git = FakeGit::new(&[]);
        let err = locate_repo(&git, "origin", None, "main").unwrap_err();
        assert!(matches!(err, RoadmapError::Configuration { .. }));
    }
}
