//! Core data types shared between core logic, the collaborators, and the UI.
//!
//! Rule of thumb:
//! - These structs are "boring bags of data"
//! - No GUI code
//! - No filesystem or network code
//!
//! Field names follow the JSON contract spoken by the scanner and comparator
//! processes, so a serde round-trip is the wire format.

use serde::{Deserialize, Serialize};

/// One locally scanned audio file.
///
/// `file` is relative to the scanned folder. Older scanners emit it as `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub artist: String,
    pub album: String,
    pub track: String,
    #[serde(default, alias = "path", skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// A popular track the collection does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingTrack {
    pub artist: String,
    pub album: String,
    pub track: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// A popular album by a local artist that is not in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub artist: String,
    pub album: String,
    pub playcount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// A single / trending track that does not belong to a known album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub artist: String,
    pub track: String,
    pub playcount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// An artist similar to the ones in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub artist: String,
    /// 0.0 ..= 1.0 as reported by Last.fm `artist.getsimilar`.
    pub similarity: f64,
    pub listeners: u64,
    pub playcount: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Result of reconciling the local track list against Last.fm.
///
/// Replaced wholesale on re-analysis; never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastFmComparison {
    pub missing_tracks: Vec<MissingTrack>,
    pub new_albums: Vec<NewAlbum>,
    pub new_songs: Vec<NewSong>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    pub total_local_tracks: usize,
    pub total_artists: usize,
}

/// Persisted user settings (`~/.music-scan-pro-settings.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastfm_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastfm_secret: Option<String>,
}

impl Settings {
    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.lastfm_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_accepts_legacy_scanner_keys() {
        let json = r#"{"artist":"A","album":"B","track":"C","filename":"c.mp3","path":"x/c.mp3"}"#;
        let t: Track = serde_json::from_str(json).unwrap();
        assert_eq!(t.file.as_deref(), Some("x/c.mp3"));
        assert_eq!(t.track, "C");
    }

    #[test]
    fn settings_use_camel_case_keys_and_omit_missing() {
        let s = Settings {
            lastfm_api_key: Some("k".into()),
            lastfm_secret: None,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"lastfmApiKey":"k"}"#);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let s = Settings {
            lastfm_api_key: Some("   ".into()),
            lastfm_secret: None,
        };
        assert_eq!(s.api_key(), None);
    }

    #[test]
    fn comparison_without_recommendations_parses() {
        let json = r#"{
            "missing_tracks": [{"artist":"A","album":"Popular Track","track":"T"}],
            "new_albums": [],
            "new_songs": [{"artist":"A","track":"T","playcount":120}],
            "total_local_tracks": 3,
            "total_artists": 1
        }"#;
        let c: LastFmComparison = serde_json::from_str(json).unwrap();
        assert!(c.recommendations.is_none());
        assert_eq!(c.new_songs[0].playcount, 120);
        assert_eq!(c.missing_tracks[0].year, None);
    }
}
