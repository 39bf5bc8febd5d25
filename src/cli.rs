//! Command line: the GUI plus the headless subcommands.
//!
//! `scan` and `compare` are the collaborator side of the JSON stdout
//! contract. The GUI spawns this same executable with those subcommands
//! unless another program is configured. `export` renders the PDF report
//! without a window.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::core;
use crate::core::collaborator::{CollaboratorCommand, Collaborators};
use crate::core::lastfm::{CompareOptions, LastFmClient, compare_collection};
use crate::core::settings::SettingsStore;
use crate::core::types::{LastFmComparison, Track};
use crate::gui::Config;

/// Environment variable consulted when `compare` gets no key argument.
pub(crate) const API_KEY_ENV: &str = "LASTFM_API_KEY";

#[derive(Parser, Debug)]
#[command(name = "music-scan-pro")]
#[command(about = "Scan a music folder and compare it with Last.fm")]
#[command(version)]
pub(crate) struct Args {
    /// Settings file (default: ~/.music-scan-pro-settings.json)
    #[arg(long, global = true, env = "MUSIC_SCAN_PRO_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Scanner program, invoked as `<program> <folder>` (default: this executable)
    #[arg(long, global = true, env = "MUSIC_SCAN_PRO_SCANNER")]
    pub scanner: Option<PathBuf>,

    /// Comparator program, invoked as `<program> <tracks.json> [api_key]` (default: this executable)
    #[arg(long, global = true, env = "MUSIC_SCAN_PRO_COMPARATOR")]
    pub comparator: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Open the desktop window (default)
    Gui,

    /// Print the MP3 tracks under a folder as a JSON array
    Scan {
        /// Folder to scan
        folder: Option<PathBuf>,
    },

    /// Compare a JSON track list with Last.fm and print the result as JSON
    Compare {
        /// JSON file holding the track list
        file: Option<PathBuf>,

        /// Last.fm API key (falls back to LASTFM_API_KEY)
        api_key: Option<String>,
    },

    /// Write the PDF report without opening a window
    Export {
        /// JSON file holding the track list
        #[arg(long)]
        tracks: PathBuf,

        /// JSON file holding a comparison result
        #[arg(long)]
        comparison: Option<PathBuf>,

        /// Output folder
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Report date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl Args {
    /// GUI configuration from the global options.
    pub(crate) fn gui_config(&self) -> Result<Config> {
        let scanner = match &self.scanner {
            Some(p) => CollaboratorCommand::external(p),
            None => CollaboratorCommand::builtin("scan").context("Failed to locate executable")?,
        };
        let comparator = match &self.comparator {
            Some(p) => CollaboratorCommand::external(p),
            None => {
                CollaboratorCommand::builtin("compare").context("Failed to locate executable")?
            }
        };
        let settings = match &self.settings {
            Some(p) => SettingsStore::new(p),
            None => SettingsStore::default_location()?,
        };

        Ok(Config {
            collaborators: Collaborators {
                scanner,
                comparator,
            },
            settings,
        })
    }
}

#[derive(Serialize)]
struct ErrorReply<'a> {
    error: &'a str,
}

/// Print `{"error": msg}` on stdout and fail.
fn reply_error(msg: &str) -> ExitCode {
    match serde_json::to_string(&ErrorReply { error: msg }) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{{\"error\":\"{}\"}}", msg.replace('"', "'")),
    }
    ExitCode::FAILURE
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> ExitCode {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => reply_error(&e.to_string()),
    }
}

/// `scan <folder>`. Anything on stderr counts as failure, so errors go to stdout.
pub(crate) fn scan(folder: Option<&Path>) -> ExitCode {
    let Some(folder) = folder else {
        return reply_error("No directory provided");
    };

    match core::scan_folder(folder) {
        Ok(tracks) => print_json(&tracks, false),
        Err(e) => reply_error(&e.to_string()),
    }
}

/// `compare <file> [api_key]`. Progress goes to stderr through tracing.
pub(crate) fn compare(file: Option<&Path>, api_key: Option<String>) -> ExitCode {
    let Some(file) = file else {
        return reply_error("No scan result provided");
    };

    let api_key = api_key
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let Some(api_key) = api_key else {
        return reply_error("No Last.fm API key provided");
    };

    let tracks: Vec<Track> = match read_json(file) {
        Ok(t) => t,
        Err(e) => return reply_error(&format!("{e:#}")),
    };

    let client = match LastFmClient::new(api_key) {
        Ok(c) => c,
        Err(e) => return reply_error(&e.to_string()),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return reply_error(&format!("Failed to start runtime: {e}")),
    };

    let comparison = runtime.block_on(compare_collection(
        &client,
        &tracks,
        &CompareOptions::default(),
    ));

    print_json(&comparison, true)
}

/// `export --tracks <file> [--comparison <file>] [--out <dir>] [--date <day>]`
pub(crate) fn export(
    tracks: &Path,
    comparison: Option<&Path>,
    out: &Path,
    date: Option<NaiveDate>,
) -> Result<ExitCode> {
    let tracks: Vec<Track> = read_json(tracks)?;
    let comparison: Option<LastFmComparison> = comparison.map(read_json).transpose()?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let path = out.join(core::report::file_name(date));
    core::report::export(&path, &tracks, comparison.as_ref(), date)?;

    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_gui() {
        let args = Args::try_parse_from(["music-scan-pro"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn collaborator_overrides_are_external_programs() {
        let args = Args::try_parse_from([
            "music-scan-pro",
            "--scanner",
            "scan_music.py",
            "--settings",
            "/tmp/settings.json",
        ])
        .unwrap();

        let config = args.gui_config().unwrap();
        assert_eq!(
            config.collaborators.scanner,
            CollaboratorCommand::external("scan_music.py")
        );
        assert_eq!(
            config.collaborators.comparator.prefix_args,
            vec![std::ffi::OsString::from("compare")]
        );
        assert_eq!(config.settings.path(), Path::new("/tmp/settings.json"));
    }

    #[test]
    fn compare_accepts_optional_key() {
        let args = Args::try_parse_from(["music-scan-pro", "compare", "tracks.json", "abc"]).unwrap();
        match args.command {
            Some(Command::Compare { file, api_key }) => {
                assert_eq!(file, Some(PathBuf::from("tracks.json")));
                assert_eq!(api_key.as_deref(), Some("abc"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn export_parses_date() {
        let args = Args::try_parse_from([
            "music-scan-pro",
            "export",
            "--tracks",
            "t.json",
            "--date",
            "2024-03-05",
        ])
        .unwrap();
        match args.command {
            Some(Command::Export { date, out, .. }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5));
                assert_eq!(out, PathBuf::from("."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn export_writes_dated_report() {
        let dir = tempfile::tempdir().unwrap();
        let tracks = dir.path().join("tracks.json");
        std::fs::write(&tracks, r#"[{"artist":"A","album":"B","track":"C"}]"#).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        export(&tracks, None, dir.path(), date).unwrap();

        let pdf = dir.path().join("Music-Collection-Analysis-2024-03-05.pdf");
        assert!(std::fs::read(pdf).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn export_rejects_malformed_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let tracks = dir.path().join("tracks.json");
        std::fs::write(&tracks, "not json").unwrap();

        let err = export(&tracks, None, dir.path(), None).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }
}
