//! CLI definition, tracing setup, and the sync command.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use color_eyre::eyre::{Result, eyre};
use roadmapsync_core::pipeline::{SyncOutcome, run_sync};
use roadmapsync_discovery::SystemGit;
use roadmapsync_shared::{
    CliOverrides, EditMode, RoadmapError, load_config_from, load_project_config, resolve_options,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// roadmap-sync: regenerate a markdown roadmap from drill JSON files.
#[derive(Debug, Parser)]
#[command(
    name = "roadmap-sync",
    version,
    about = "Sync a markdown roadmap section with a directory of drill JSON files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Markdown document to update [default: preflop_training.md].
    #[arg(long, value_name = "PATH")]
    pub markdown: Option<PathBuf>,

    /// Directory scanned recursively for drill files [default: drills].
    #[arg(long, value_name = "PATH")]
    pub json_dir: Option<PathBuf>,

    /// Update strategy [default: section].
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Heading line that opens the roadmap section [default: "## Roadmap"].
    #[arg(long)]
    pub heading: Option<String>,

    /// Branch used in links instead of the current git branch.
    #[arg(long)]
    pub branch: Option<String>,

    /// Git remote that identifies the repository [default: origin].
    #[arg(long)]
    pub remote: Option<String>,

    /// Config file (defaults to ./roadmap-sync.toml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show what would change without writing the document.
    #[arg(long, conflicts_with = "check")]
    pub dry_run: bool,

    /// Exit with an error if the document is out of date.
    #[arg(long)]
    pub check: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Document update strategy.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum ModeArg {
    /// Regenerate the roadmap section below its quoted preamble.
    Section,
    /// Append a link to the first line mentioning each drill.
    Suffix,
}

impl From<ModeArg> for EditMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Section => EditMode::Section,
            ModeArg::Suffix => EditMode::Suffix,
        }
    }
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            markdown: self.markdown.clone(),
            json_dir: self.json_dir.clone(),
            mode: self.mode.map(EditMode::from),
            heading: self.heading.clone(),
            remote: self.remote.clone(),
            branch: self.branch.clone(),
            dry_run: self.dry_run,
            check: self.check,
        }
    }
}

/// Parse arguments. `Ok(None)` means help or version text was printed.
pub(crate) fn parse_cli<I, T>(args: I) -> std::result::Result<Option<Cli>, RoadmapError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()
                .map_err(|io| RoadmapError::io("<stdout>", io))?;
            Ok(None)
        }
        Err(e) => {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            Err(RoadmapError::argument(
                first_line.trim_start_matches("error: ").trim(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directives(level)));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Filter directives for the library crates and this binary.
fn log_directives(level: &str) -> String {
    format!("roadmapsync={level},{}={level}", env!("CARGO_CRATE_NAME"))
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Parse `args`, resolve options, and run one sync.
pub(crate) async fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(cli) = parse_cli(args)? else {
        return Ok(());
    };
    init_tracing(&cli);

    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_project_config(&cwd)?,
    };
    let options = resolve_options(config, cli.overrides())?;

    info!(
        markdown = %options.markdown_path.display(),
        json_dir = %options.json_dir.display(),
        mode = %options.mode,
        "syncing roadmap"
    );

    let git = SystemGit::new(Some(cwd));
    let report = run_sync(&options, &git).await?;

    info!(
        repo = %report.location.slug(),
        drills = report.drill_count,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "done"
    );

    match report.outcome {
        SyncOutcome::Unchanged => println!("No changes."),
        SyncOutcome::Updated => println!("Updated {}", report.markdown_path.display()),
        SyncOutcome::WouldUpdate if options.check => {
            return Err(eyre!("would update {}", report.markdown_path.display()));
        }
        SyncOutcome::WouldUpdate => {
            println!("Would update {}", report.markdown_path.display());
        }
    }

    Ok(())
}
