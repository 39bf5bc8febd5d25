//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use super::state::{Busy, Tab};
use crate::core::types::LastFmComparison;

pub(crate) const SCAN_MESSAGES: &[&str] = &[
    "Scanning your music collection...",
    "Analyzing those sweet riffs...",
    "Counting beats and rhythms...",
    "Checking for chart-toppers...",
    "Discovering hidden gems...",
    "Reading musical metadata...",
    "Jazz-ing up the analysis...",
    "Orchestrating your library...",
    "Finding your next favorite song...",
    "Tuning up the database...",
    "Rocking through your files...",
    "Mic check, one two...",
    "Dropping the bass... line scan...",
    "Keeping time with your tracks...",
    "Playing all the right notes...",
    "Trumpet-ing your collection...",
    "Stringing together your music...",
    "Dancing through directories...",
];

pub(crate) const LASTFM_MESSAGES: &[&str] = &[
    "Analyzing your collection with Last.fm...",
    "Fetching top tracks and albums...",
    "Comparing with global music trends...",
    "Finding missing chart-toppers...",
    "Discovering popular releases...",
    "Analyzing listening patterns...",
    "Cross-referencing with Last.fm database...",
    "Scanning for hidden classics...",
    "Checking album completeness...",
    "Evaluating your music taste...",
    "Hunting for trending tracks...",
    "Tuning into popular frequencies...",
    "Harmonizing with the music community...",
    "Jazz-ing up the Last.fm connection...",
    "Beating through the charts...",
    "Playing the keys to discovery...",
];

/// Current status line for the loading screen.
pub(crate) fn loading_message(busy: Busy, tick: usize) -> &'static str {
    let messages = match busy {
        Busy::Scanning => SCAN_MESSAGES,
        Busy::Analyzing => LASTFM_MESSAGES,
    };
    messages[tick % messages.len()]
}

/// Tab button label with its item count.
/// Ex: "Missing Tracks (12)"; counts are 0 before an analysis.
pub(crate) fn tab_label(tab: Tab, comparison: Option<&LastFmComparison>) -> String {
    let count = |f: fn(&LastFmComparison) -> usize| comparison.map_or(0, f);

    match tab {
        Tab::Overview => "Overview".to_string(),
        Tab::Missing => format!("Missing Tracks ({})", count(|c| c.missing_tracks.len())),
        Tab::Albums => format!("Popular Albums ({})", count(|c| c.new_albums.len())),
        Tab::Songs => format!("Popular Songs ({})", count(|c| c.new_songs.len())),
        Tab::Recommendations => format!(
            "Artist Recommendations ({})",
            count(|c| c.recommendations.as_ref().map_or(0, Vec::len))
        ),
    }
}

/// 0.0..=1.0 -> "87%"
pub(crate) fn similarity_percent(similarity: f64) -> String {
    format!("{}%", (similarity.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Display an album name, with a placeholder for blank tags.
pub(crate) fn album_or_unknown(album: &str) -> &str {
    if album.trim().is_empty() {
        "Unknown Album"
    } else {
        album
    }
}

pub(crate) const NO_MISSING_TRACKS: &str = "No missing tracks found! Your collection is complete.";

/// Empty-state line for the Missing Tracks tab, or `None` when there is a list to show.
pub(crate) fn missing_empty_message(comparison: &LastFmComparison) -> Option<&'static str> {
    comparison
        .missing_tracks
        .is_empty()
        .then_some(NO_MISSING_TRACKS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MissingTrack, Recommendation};

    #[test]
    fn loading_message_wraps() {
        assert_eq!(loading_message(Busy::Scanning, 0), SCAN_MESSAGES[0]);
        assert_eq!(
            loading_message(Busy::Scanning, SCAN_MESSAGES.len() + 1),
            SCAN_MESSAGES[1]
        );
        assert_eq!(
            loading_message(Busy::Analyzing, LASTFM_MESSAGES.len()),
            LASTFM_MESSAGES[0]
        );
    }

    #[test]
    fn tab_labels_show_counts() {
        assert_eq!(tab_label(Tab::Missing, None), "Missing Tracks (0)");

        let c = LastFmComparison {
            missing_tracks: vec![MissingTrack {
                artist: "A".into(),
                album: "B".into(),
                track: "C".into(),
                year: None,
            }],
            recommendations: Some(vec![Recommendation {
                artist: "X".into(),
                similarity: 0.9,
                listeners: 1,
                playcount: 1,
                tags: Vec::new(),
                image: None,
            }]),
            ..Default::default()
        };
        assert_eq!(tab_label(Tab::Missing, Some(&c)), "Missing Tracks (1)");
        assert_eq!(tab_label(Tab::Albums, Some(&c)), "Popular Albums (0)");
        assert_eq!(
            tab_label(Tab::Recommendations, Some(&c)),
            "Artist Recommendations (1)"
        );
        assert_eq!(tab_label(Tab::Overview, Some(&c)), "Overview");
    }

    #[test]
    fn similarity_rounds_to_whole_percent() {
        assert_eq!(similarity_percent(0.876), "88%");
        assert_eq!(similarity_percent(1.0), "100%");
        assert_eq!(similarity_percent(1.7), "100%");
    }

    #[test]
    fn blank_album_gets_placeholder() {
        assert_eq!(album_or_unknown("  "), "Unknown Album");
        assert_eq!(album_or_unknown("Paranoid"), "Paranoid");
    }

    #[test]
    fn empty_missing_list_reports_complete_collection() {
        let empty = LastFmComparison::default();
        assert_eq!(
            missing_empty_message(&empty),
            Some("No missing tracks found! Your collection is complete.")
        );

        let one = LastFmComparison {
            missing_tracks: vec![MissingTrack {
                artist: "A".into(),
                album: String::new(),
                track: "C".into(),
                year: None,
            }],
            ..Default::default()
        };
        assert_eq!(missing_empty_message(&one), None);
    }
}
