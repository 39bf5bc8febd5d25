//! core/tags/util.rs
//! Small parsing helpers shared by tag reading.

/// Fields recovered from a file stem like `Artist - Album - Title`.
///
/// `None` means the stem says nothing about that field; keep the tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StemParts {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: String,
}

/// Parse a file stem:
/// - "A - B - C" -> artist A, album B, title C
/// - "A - B" -> artist A, title B
/// - anything else -> title only
pub(crate) fn split_stem(stem: &str) -> StemParts {
    let parts: Vec<&str> = stem.split(" - ").collect();

    match parts.as_slice() {
        [artist, album, title] => StemParts {
            artist: Some(artist.trim().to_string()),
            album: Some(album.trim().to_string()),
            title: title.trim().to_string(),
        },
        [artist, title] => StemParts {
            artist: Some(artist.trim().to_string()),
            album: None,
            title: title.trim().to_string(),
        },
        _ => StemParts {
            artist: None,
            album: None,
            title: stem.trim().to_string(),
        },
    }
}

/// Trimmed owned copy of an optional tag value ("" when absent).
pub(crate) fn clean(s: Option<&str>) -> String {
    s.map(str::trim).unwrap_or_default().to_string()
}
