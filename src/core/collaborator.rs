//! Scanner / comparator processes and their JSON stdout contract.
//!
//! - scan: `<program> <folder>` prints a JSON array of `Track`
//! - compare: `<program> <tracks.json> [api_key]` prints a `LastFmComparison`
//!
//! Each call spawns one process and waits for it. No retry, no timeout.
//! Every failure comes back as a `CollaboratorError`, never a panic.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::process::Command;

use super::error::CollaboratorError;
use super::types::{LastFmComparison, Track};

/// How to launch one collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorCommand {
    pub program: PathBuf,
    /// Inserted before the per-call arguments (e.g. the subcommand name).
    pub prefix_args: Vec<OsString>,
}

impl CollaboratorCommand {
    /// A program that takes the contract arguments directly (legacy scripts).
    pub fn external(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// This executable, invoked with `subcommand` first.
    pub fn builtin(subcommand: &str) -> std::io::Result<Self> {
        Ok(Self {
            program: std::env::current_exe()?,
            prefix_args: vec![OsString::from(subcommand)],
        })
    }

    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.prefix_args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Scanner + comparator pair used by the GUI.
#[derive(Debug, Clone)]
pub struct Collaborators {
    pub scanner: CollaboratorCommand,
    pub comparator: CollaboratorCommand,
}

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub(crate) struct ProcessOutput {
    /// Trimmed stdout.
    pub stdout: String,
    /// Trimmed stderr.
    pub stderr: String,
    pub success: bool,
    pub status: String,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

/// Which side of the contract we are interpreting.
#[derive(Debug, Clone, Copy)]
struct Role {
    /// "scanner" (used in spawn errors)
    name: &'static str,
    /// "Scanner" (used in stderr/exit errors)
    label: &'static str,
    /// "scan" (used in parse errors)
    what: &'static str,
}

const SCANNER: Role = Role {
    name: "scanner",
    label: "Scanner",
    what: "scan",
};

const COMPARATOR: Role = Role {
    name: "comparator",
    label: "Comparator",
    what: "compare",
};

/// Run the scanner over `folder`.
pub async fn run_scan(
    cmd: &CollaboratorCommand,
    folder: &Path,
) -> Result<Vec<Track>, CollaboratorError> {
    tracing::info!("Scanning {}", folder.display());

    let out = spawn_and_wait(cmd, &[folder.as_os_str().to_owned()], SCANNER).await?;
    let result = interpret_scan(&out);

    match &result {
        Ok(tracks) => tracing::info!("Scanner returned {} tracks", tracks.len()),
        Err(e) => tracing::warn!("Scan failed: {e} (stdout: {:?})", e.raw().unwrap_or("")),
    }
    result
}

/// Run the comparator over `tracks`.
///
/// The track list is handed over through a temporary JSON file that is
/// removed when this call returns.
pub async fn run_compare(
    cmd: &CollaboratorCommand,
    tracks: &[Track],
    api_key: Option<&str>,
) -> Result<LastFmComparison, CollaboratorError> {
    let tmp = write_track_list(tracks)?;
    tracing::info!(
        "Comparing {} tracks with Last.fm via {}",
        tracks.len(),
        tmp.display()
    );

    let mut args = vec![tmp.as_os_str().to_owned()];
    if let Some(key) = api_key {
        args.push(OsString::from(key));
    }

    let out = spawn_and_wait(cmd, &args, COMPARATOR).await;
    drop(tmp);

    let result = interpret_compare(&out?);
    match &result {
        Ok(c) => tracing::info!(
            "Comparator found {} missing tracks, {} new songs",
            c.missing_tracks.len(),
            c.new_songs.len()
        ),
        Err(e) => tracing::warn!("Compare failed: {e}"),
    }
    result
}

fn write_track_list(tracks: &[Track]) -> Result<tempfile::TempPath, CollaboratorError> {
    let json = serde_json::to_string_pretty(tracks)
        .map_err(|e| CollaboratorError::TempFile(e.to_string()))?;

    let mut file = tempfile::Builder::new()
        .prefix("music_scan_")
        .suffix(".json")
        .tempfile()
        .map_err(|e| CollaboratorError::TempFile(e.to_string()))?;

    file.write_all(json.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| CollaboratorError::TempFile(e.to_string()))?;

    // Close our handle so the child can open the file on every platform.
    Ok(file.into_temp_path())
}

async fn spawn_and_wait(
    cmd: &CollaboratorCommand,
    args: &[OsString],
    role: Role,
) -> Result<ProcessOutput, CollaboratorError> {
    let output = Command::new(&cmd.program)
        .args(&cmd.prefix_args)
        .args(args)
        .output()
        .await
        .map_err(|source| CollaboratorError::Spawn {
            role: role.name,
            source,
        })?;

    Ok(ProcessOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        success: output.status.success(),
        status: output.status.to_string(),
    })
}

/// Scanner: any stderr output is a failure, even with valid stdout.
pub(crate) fn interpret_scan(out: &ProcessOutput) -> Result<Vec<Track>, CollaboratorError> {
    if !out.stderr.is_empty() {
        return Err(CollaboratorError::Stderr {
            label: SCANNER.label,
            stderr: out.stderr.clone(),
            raw: out.stdout.clone(),
        });
    }

    interpret(out, SCANNER)
}

/// Comparator: stderr carries progress, so stdout is tried first.
pub(crate) fn interpret_compare(
    out: &ProcessOutput,
) -> Result<LastFmComparison, CollaboratorError> {
    interpret(out, COMPARATOR)
}

fn interpret<T: DeserializeOwned>(out: &ProcessOutput, role: Role) -> Result<T, CollaboratorError> {
    let parsed = serde_json::from_str::<T>(&out.stdout).ok();

    // A result only counts when the process also exited cleanly.
    if out.success {
        if let Some(value) = parsed {
            return Ok(value);
        }
    }

    if let Ok(reply) = serde_json::from_str::<ErrorReply>(&out.stdout) {
        return Err(CollaboratorError::Reported(reply.error));
    }

    if parsed.is_some() {
        return Err(CollaboratorError::ExitStatus {
            label: role.label,
            status: out.status.clone(),
        });
    }

    if !out.stderr.is_empty() {
        return Err(CollaboratorError::Stderr {
            label: role.label,
            stderr: out.stderr.clone(),
            raw: out.stdout.clone(),
        });
    }

    if !out.success {
        return Err(CollaboratorError::ExitStatus {
            label: role.label,
            status: out.status.clone(),
        });
    }

    Err(CollaboratorError::Parse {
        what: role.what,
        raw: out.stdout.clone(),
    })
}
