//! core/mod.rs
//!
//! The brain of the app:
//! - Discover music files and read their tags (built-in scanner)
//! - Talk to Last.fm and classify the collection (built-in comparator)
//! - Spawn scanner/comparator processes and interpret their JSON (collaborator)
//! - Settings file, collection stats, PDF report
//!
//! The scan pipeline is explicit:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) read tags -> Vec<Track>

pub mod collaborator;
pub mod error;
pub mod lastfm;
pub mod library;
pub mod links;
pub mod report;
pub mod settings;
pub mod stats;
pub mod tags;
pub mod types;

use std::path::{Path, PathBuf};

use error::ScanError;
use types::Track;

/// Discover candidate audio files under `root` (sorted).
pub fn scan_paths(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    library::scan_mp3s(root)
}

/// Read tags for already-discovered paths.
///
/// - Never fails hard per-file
/// - Returns (tracks, tag_failures)
pub fn read_tracks(root: &Path, paths: &[PathBuf]) -> (Vec<Track>, usize) {
    let mut rows = Vec::with_capacity(paths.len());
    let mut tag_failures = 0usize;

    for path in paths {
        let (row, failed) = tags::read_track(root, path);
        if failed {
            tag_failures += 1;
        }
        rows.push(row);
    }

    (rows, tag_failures)
}

/// Both stages in one call. This is what the `scan` subcommand prints.
pub fn scan_folder(root: &Path) -> Result<Vec<Track>, ScanError> {
    let paths = scan_paths(root)?;
    let (rows, failures) = read_tracks(root, &paths);
    tracing::debug!(
        "Scanned {}: {} tracks ({} without readable tags)",
        root.display(),
        rows.len(),
        failures
    );
    Ok(rows)
}
