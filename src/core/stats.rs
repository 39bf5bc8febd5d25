//! Collection statistics and grouping used by the dashboard and the report.
//!
//! All grouping keeps input order inside a group. Group order is either
//! first-appearance (on-screen lists) or alphabetical (report sections).

use std::collections::{HashMap, HashSet};

use super::types::{MissingTrack, Track};

/// Totals shown in the "Your Collection" card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total_tracks: usize,
    pub total_artists: usize,
    /// Distinct (artist, album) pairs.
    pub total_albums: usize,
}

impl CollectionStats {
    pub fn from_tracks(tracks: &[Track]) -> Self {
        let artists: HashSet<&str> = tracks.iter().map(|t| t.artist.as_str()).collect();
        let albums: HashSet<(&str, &str)> = tracks
            .iter()
            .map(|t| (t.artist.as_str(), t.album.as_str()))
            .collect();

        Self {
            total_tracks: tracks.len(),
            total_artists: artists.len(),
            total_albums: albums.len(),
        }
    }
}

/// One artist bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistGroup<T> {
    pub artist: String,
    pub items: Vec<T>,
}

/// One album bucket inside an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumGroup<T> {
    pub album: String,
    pub items: Vec<T>,
}

impl<T> ArtistGroup<AlbumGroup<T>> {
    /// Total leaf items across all albums.
    pub fn leaf_count(&self) -> usize {
        self.items.iter().map(|a| a.items.len()).sum()
    }
}

/// Group items by a key, groups in first-appearance order.
pub fn group_by_artist<T: Clone>(
    items: &[T],
    artist_of: impl Fn(&T) -> &str,
) -> Vec<ArtistGroup<T>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<ArtistGroup<T>> = Vec::new();

    for item in items {
        let artist = artist_of(item);
        let slot = *index.entry(artist).or_insert_with(|| {
            out.push(ArtistGroup {
                artist: artist.to_string(),
                items: Vec::new(),
            });
            out.len() - 1
        });
        out[slot].items.push(item.clone());
    }

    out
}

/// Same as [`group_by_artist`], artists sorted alphabetically.
pub fn group_by_artist_sorted<T: Clone>(
    items: &[T],
    artist_of: impl Fn(&T) -> &str,
) -> Vec<ArtistGroup<T>> {
    let mut groups = group_by_artist(items, artist_of);
    groups.sort_by(|a, b| a.artist.cmp(&b.artist));
    groups
}

/// Missing tracks as artist -> album -> items (first-appearance order at both levels).
pub fn group_missing(tracks: &[MissingTrack]) -> Vec<ArtistGroup<AlbumGroup<MissingTrack>>> {
    group_by_artist(tracks, |t| t.artist.as_str())
        .into_iter()
        .map(|g| ArtistGroup {
            artist: g.artist,
            items: group_albums(g.items),
        })
        .collect()
}

fn group_albums(items: Vec<MissingTrack>) -> Vec<AlbumGroup<MissingTrack>> {
    let mut out: Vec<AlbumGroup<MissingTrack>> = Vec::new();

    for item in items {
        match out.iter_mut().find(|g| g.album == item.album) {
            Some(g) => g.items.push(item),
            None => out.push(AlbumGroup {
                album: item.album.clone(),
                items: vec![item],
            }),
        }
    }

    out
}

/// Artists ranked by local track count (descending), ties in first-appearance order.
pub fn top_artists(tracks: &[Track], n: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = group_by_artist(tracks, |t| t.artist.as_str())
        .into_iter()
        .map(|g| (g.artist, g.items.len()))
        .collect();

    // Stable sort keeps first-appearance order for ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Format an integer with comma thousands separators ("12,345").
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str, album: &str, title: &str) -> Track {
        Track {
            artist: artist.into(),
            album: album.into(),
            track: title.into(),
            file: None,
        }
    }

    fn missing(artist: &str, album: &str, title: &str) -> MissingTrack {
        MissingTrack {
            artist: artist.into(),
            album: album.into(),
            track: title.into(),
            year: None,
        }
    }

    #[test]
    fn empty_collection_has_zero_stats() {
        assert_eq!(CollectionStats::from_tracks(&[]), CollectionStats::default());
    }

    #[test]
    fn albums_are_distinct_per_artist() {
        let tracks = vec![
            track("A", "Greatest Hits", "1"),
            track("A", "Greatest Hits", "2"),
            track("B", "Greatest Hits", "3"),
        ];
        let s = CollectionStats::from_tracks(&tracks);
        assert_eq!(s.total_tracks, 3);
        assert_eq!(s.total_artists, 2);
        assert_eq!(s.total_albums, 2);
    }

    #[test]
    fn same_artist_and_album_share_one_node_in_input_order() {
        let input = vec![
            missing("Muse", "Absolution", "Hysteria"),
            missing("Blur", "Parklife", "Girls & Boys"),
            missing("Muse", "Origin", "Bliss"),
            missing("Muse", "Absolution", "Time Is Running Out"),
        ];

        let groups = group_missing(&input);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].artist, "Muse");
        assert_eq!(groups[0].leaf_count(), 3);
        assert_eq!(groups[0].items[0].album, "Absolution");
        let titles: Vec<_> = groups[0].items[0].items.iter().map(|t| t.track.as_str()).collect();
        assert_eq!(titles, vec!["Hysteria", "Time Is Running Out"]);
    }

    #[test]
    fn empty_missing_list_yields_no_groups() {
        assert!(group_missing(&[]).is_empty());
    }

    #[test]
    fn top_artists_breaks_ties_by_first_appearance() {
        let tracks = vec![
            track("X", "", "1"),
            track("Y", "", "1"),
            track("Y", "", "2"),
            track("Z", "", "1"),
            track("X", "", "2"),
            track("W", "", "1"),
        ];
        let top = top_artists(&tracks, 3);
        assert_eq!(
            top,
            vec![("X".to_string(), 2), ("Y".to_string(), 2), ("Z".to_string(), 1)]
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
