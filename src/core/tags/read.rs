//! core/tags/read.rs
//! Read ID3 tags from an MP3 and convert them into a `Track`.
//!
//! - Tag read failure is non-fatal: the file name still yields a row.
//! - When artist or title is missing, the file stem is parsed instead.

use std::path::Path;

use id3::{Tag, TagLike};

use super::super::types::Track;
use super::util::{clean, split_stem};

/// Read one file into a `Track`.
///
/// `root` is the scanned folder; `Track.file` is stored relative to it.
/// Returns `(track, tag_failed)`.
pub fn read_track(root: &Path, path: &Path) -> (Track, bool) {
    let (mut artist, mut album, mut title, failed) = match Tag::read_from_path(path) {
        Ok(tag) => (
            clean(tag.artist()),
            clean(tag.album()),
            clean(tag.title()),
            false,
        ),
        Err(e) => {
            tracing::debug!("No readable ID3 tag in {}: {e}", path.display());
            (String::new(), String::new(), String::new(), true)
        }
    };

    if artist.is_empty() || title.is_empty() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let parsed = split_stem(&stem);
        title = parsed.title;
        if let Some(a) = parsed.artist {
            artist = a;
        }
        if let Some(a) = parsed.album {
            album = a;
        }
    }

    let file = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();

    (
        Track {
            artist: artist.trim().to_string(),
            album: album.trim().to_string(),
            track: title.trim().to_string(),
            file: Some(file),
        },
        failed,
    )
}
