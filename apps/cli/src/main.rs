//! roadmap-sync CLI: keep a markdown roadmap in step with drill JSON files.
//!
//! Reads the drill directory, derives blob links from the git remote, and
//! rewrites the roadmap section of the document only when it changed.

mod commands;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match commands::run(std::env::args_os()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("error: {report}");
            ExitCode::FAILURE
        }
    }
}
