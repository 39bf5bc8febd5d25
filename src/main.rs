//! Music Scan Pro
//!
//! # What this program is
//! A desktop app (built with the `iced` GUI library) that scans a folder for `.mp3`
//! files, reads their ID3 tags, and compares the collection with Last.fm to find
//! missing tracks, popular albums, trending singles, and similar artists. The
//! results can be exported as a PDF report.
//!
//! # Flow
//! Every step is a `Message` handled in `gui::update`, and `gui::view` renders
//! whatever `MusicScanPro` holds afterwards:
//!
//! 1. `SelectFolder` / `ScanTypedFolder` start a scan; `ScanFinished` stores
//!    the `Vec<Track>` and opens the dashboard.
//! 2. `Analyze` sends those tracks to the comparator; `CompareFinished` stores
//!    the `LastFmComparison` that fills the Missing, Albums, Songs and
//!    Recommendations tabs.
//! 3. `ExportPdf` asks for a save path and renders the tracks plus the
//!    comparison into a report; `ExportFinished` reports where it landed.
//!
//! # Processes
//! Scanning and comparing run in child processes that print JSON on stdout.
//! By default the child is this same executable (`scan` / `compare`
//! subcommands); `--scanner` / `--comparator` point at other programs that
//! speak the same contract.
//!
//! # Background work
//! Child processes are awaited inside `Task::perform`. Settings I/O and PDF
//! rendering go through `spawn_blocking`. Each result comes back as its
//! `*Finished` / `*Loaded` / `*Saved` message.

mod cli;
mod core;
mod gui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    match &args.command {
        // The host treats any scanner stderr as failure: keep it silent
        // regardless of RUST_LOG.
        Some(Command::Scan { folder }) => {
            init_logging(Some("error"), "error");
            Ok(cli::scan(folder.as_deref()))
        }
        Some(Command::Compare { file, api_key }) => {
            init_logging(None, "info");
            Ok(cli::compare(file.as_deref(), api_key.clone()))
        }
        Some(Command::Export {
            tracks,
            comparison,
            out,
            date,
        }) => {
            init_logging(None, "info");
            cli::export(tracks, comparison.as_deref(), out, *date)
        }
        Some(Command::Gui) | None => {
            init_logging(None, "info");
            let config = args.gui_config()?;
            tracing::info!("Settings file: {}", config.settings.path().display());
            gui::run(config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr. `forced` ignores RUST_LOG; otherwise RUST_LOG wins over `default`.
fn init_logging(forced: Option<&str>, default: &str) {
    let filter = match forced {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
