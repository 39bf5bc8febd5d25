//! Error types for the core modules.
//!
//! The GUI never shows these as values; it shows `to_string()` in a banner.
//! So the `#[error]` strings are the user-facing text.

use std::path::PathBuf;

use thiserror::Error;

/// Folder walk errors (built-in scanner).
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Not a folder: {0}")]
    NotAFolder(PathBuf),
}

/// Scanner/comparator subprocess failures.
///
/// `raw` keeps the trimmed stdout for the log, like the old `{ error, raw }` replies.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Failed to start {role}: {source}")]
    Spawn {
        role: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} error: {stderr}")]
    Stderr {
        label: &'static str,
        stderr: String,
        raw: String,
    },

    #[error("{label} exited with {status}")]
    ExitStatus { label: &'static str, status: String },

    #[error("{0}")]
    Reported(String),

    #[error("Failed to parse {what} result")]
    Parse { what: &'static str, raw: String },

    #[error("Failed to prepare track list: {0}")]
    TempFile(String),
}

impl CollaboratorError {
    /// Raw stdout captured from the collaborator, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            CollaboratorError::Stderr { raw, .. } | CollaboratorError::Parse { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

/// Settings file failures. Details go to the log, not the banner.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings")]
    Load(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to save settings")]
    Save(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Could not locate the home directory")]
    NoHome,
}

/// Last.fm transport / decoding failures.
#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Last.fm error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Unexpected Last.fm response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Last.fm URL: {0}")]
    Url(#[from] url::ParseError),
}

/// PDF export failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
