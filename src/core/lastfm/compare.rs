//! Collection vs. catalog reconciliation.
//!
//! Per local artist: albums the collection lacks, popular tracks the
//! collection lacks (placed on their album when one can be found), and
//! recent releases. Then similar-artist recommendations seeded by the
//! artists with the most local tracks.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::super::error::LastFmError;
use super::super::stats::{group_by_artist, top_artists};
use super::super::types::{LastFmComparison, MissingTrack, NewAlbum, NewSong, Recommendation, Track};
use super::fuzzy::{any_similar, is_similar};
use super::{Catalog, CatalogAlbum, CatalogTrack, Period};

pub const ALBUM_PLAYCOUNT_MIN: u64 = 2000;
pub const TRACK_PLAYCOUNT_MIN: u64 = 100;

pub const POPULAR_TRACK_ALBUM: &str = "Popular Track";
pub const RECENT_RELEASE_ALBUM: &str = "Recent Release";

const TOP_ALBUMS_LIMIT: u32 = 50;
const TOP_TRACKS_LIMIT: u32 = 50;
const RECENT_TRACKS_LIMIT: u32 = 20;

const MAX_MISSING: usize = 300;
const MAX_NEW_ALBUMS: usize = 100;
const MAX_NEW_SONGS: usize = 100;

#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Sleep between artists to stay under the API rate limit.
    pub artist_pause: Duration,
    pub recommendation_seeds: usize,
    pub similar_limit: u32,
    pub max_recommendations: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            artist_pause: Duration::from_millis(100),
            recommendation_seeds: 5,
            similar_limit: 10,
            max_recommendations: 20,
        }
    }
}

/// Run the full comparison. Catalog failures are logged and treated as
/// empty results, so this never fails.
pub async fn compare_collection<C>(
    catalog: &C,
    tracks: &[Track],
    options: &CompareOptions,
) -> LastFmComparison
where
    C: Catalog + ?Sized,
{
    let mut session = Session {
        catalog,
        album_tracks: HashMap::new(),
    };

    let by_artist = group_by_artist(tracks, |t| t.artist.as_str());
    let total = by_artist.len();

    let mut missing_tracks: Vec<MissingTrack> = Vec::new();
    let mut new_albums: Vec<NewAlbum> = Vec::new();
    let mut new_songs: Vec<NewSong> = Vec::new();

    for (i, group) in by_artist.iter().enumerate() {
        let artist = group.artist.as_str();
        tracing::info!(
            "Processing artist {}/{}: {} ({} local tracks)",
            i + 1,
            total,
            artist,
            group.items.len()
        );

        match catalog.search_artist(artist).await {
            Ok(Some(found)) => tracing::debug!("matched {artist} -> {}", found.name),
            Ok(None) => {
                tracing::info!("Could not find artist: {artist}, continuing with limited data")
            }
            Err(e) => tracing::warn!("Error searching for artist {artist}: {e}"),
        }

        let albums = logged(
            catalog.top_albums(artist, TOP_ALBUMS_LIMIT).await,
            "albums",
            artist,
        );
        let top = logged(
            catalog
                .top_tracks(artist, Period::Overall, TOP_TRACKS_LIMIT)
                .await,
            "top tracks",
            artist,
        );
        let recent = logged(
            catalog
                .top_tracks(artist, Period::OneMonth, RECENT_TRACKS_LIMIT)
                .await,
            "recent tracks",
            artist,
        );

        let local_albums: HashSet<&str> = group
            .items
            .iter()
            .map(|t| t.album.as_str())
            .filter(|a| !a.is_empty())
            .collect();
        let local_titles: HashSet<&str> = group.items.iter().map(|t| t.track.as_str()).collect();

        for album in &albums {
            if album.playcount > ALBUM_PLAYCOUNT_MIN
                && !any_similar(&album.name, local_albums.iter().copied())
            {
                new_albums.push(NewAlbum {
                    artist: artist.to_string(),
                    album: album.name.clone(),
                    playcount: album.playcount,
                    year: None,
                });
            }
        }

        for track in &top {
            if track.playcount <= TRACK_PLAYCOUNT_MIN
                || any_similar(&track.name, local_titles.iter().copied())
            {
                continue;
            }

            let found = session.find_album(artist, &albums, &track.name).await;
            let album = found.as_deref().unwrap_or(POPULAR_TRACK_ALBUM);
            push_missing(&mut missing_tracks, artist, album, track);
            if found.is_none() {
                new_songs.push(new_song(artist, track));
            }
        }

        for track in &recent {
            if any_similar(&track.name, local_titles.iter().copied()) {
                continue;
            }

            let found = session.find_album(artist, &albums, &track.name).await;

            let already_missing = missing_tracks
                .iter()
                .any(|m| m.artist == artist && is_similar(&m.track, &track.name));
            if already_missing {
                continue;
            }

            let album = found.as_deref().unwrap_or(RECENT_RELEASE_ALBUM);
            push_missing(&mut missing_tracks, artist, album, track);

            if found.is_none() {
                let already_song = new_songs
                    .iter()
                    .any(|s| s.artist == artist && is_similar(&s.track, &track.name));
                if !already_song {
                    new_songs.push(new_song(artist, track));
                }
            }
        }

        let found_for_artist = missing_tracks.iter().filter(|m| m.artist == artist).count();
        tracing::info!("  -> Found {found_for_artist} missing tracks for {artist}");

        if !options.artist_pause.is_zero() {
            tokio::time::sleep(options.artist_pause).await;
        }
    }

    // Vec::sort_by is stable: input order survives within an artist.
    missing_tracks.sort_by(|a, b| a.artist.cmp(&b.artist));
    missing_tracks.truncate(MAX_MISSING);

    new_albums.sort_by(|a, b| b.playcount.cmp(&a.playcount));
    new_albums.truncate(MAX_NEW_ALBUMS);

    new_songs.sort_by(|a, b| b.playcount.cmp(&a.playcount));
    new_songs.truncate(MAX_NEW_SONGS);

    tracing::info!(
        "Final results: {} missing tracks, {} new songs",
        missing_tracks.len(),
        new_songs.len()
    );

    let recommendations = recommend(catalog, tracks, options).await;

    LastFmComparison {
        missing_tracks,
        new_albums,
        new_songs,
        recommendations: Some(recommendations),
        total_local_tracks: tracks.len(),
        total_artists: total,
    }
}

/// Per-run state: album track lists are fetched at most once.
struct Session<'a, C: ?Sized> {
    catalog: &'a C,
    album_tracks: HashMap<(String, String), Vec<String>>,
}

impl<C> Session<'_, C>
where
    C: Catalog + ?Sized,
{
    /// First of `albums` containing a track similar to `title`.
    async fn find_album(
        &mut self,
        artist: &str,
        albums: &[CatalogAlbum],
        title: &str,
    ) -> Option<String> {
        for album in albums {
            let key = (artist.to_string(), album.name.clone());
            if !self.album_tracks.contains_key(&key) {
                let names = logged(
                    self.catalog.album_tracks(artist, &album.name).await,
                    "album tracks",
                    &album.name,
                );
                self.album_tracks.insert(key.clone(), names);
            }

            let hit = self
                .album_tracks
                .get(&key)
                .is_some_and(|names| any_similar(title, names.iter().map(String::as_str)));
            if hit {
                return Some(album.name.clone());
            }
        }
        None
    }
}

fn push_missing(out: &mut Vec<MissingTrack>, artist: &str, album: &str, track: &CatalogTrack) {
    out.push(MissingTrack {
        artist: artist.to_string(),
        album: album.to_string(),
        track: track.name.clone(),
        year: None,
    });
}

fn new_song(artist: &str, track: &CatalogTrack) -> NewSong {
    NewSong {
        artist: artist.to_string(),
        track: track.name.clone(),
        playcount: track.playcount,
        year: None,
    }
}

fn logged<T: Default>(result: Result<T, LastFmError>, what: &str, subject: &str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Error getting {what} for {subject}: {e}");
        T::default()
    })
}

/// Similar artists for the biggest local artists, minus what's already here.
async fn recommend<C>(catalog: &C, tracks: &[Track], options: &CompareOptions) -> Vec<Recommendation>
where
    C: Catalog + ?Sized,
{
    let owned: HashSet<String> = tracks.iter().map(|t| t.artist.to_lowercase()).collect();

    // name -> best similarity, in first-seen order
    let mut candidates: Vec<(String, f64)> = Vec::new();

    for (seed, _) in top_artists(tracks, options.recommendation_seeds) {
        let similar = logged(
            catalog.similar_artists(&seed, options.similar_limit).await,
            "similar artists",
            &seed,
        );

        for s in similar {
            if owned.contains(&s.name.to_lowercase()) {
                continue;
            }
            match candidates
                .iter_mut()
                .find(|(name, _)| name.eq_ignore_ascii_case(&s.name))
            {
                Some((_, best)) => *best = best.max(s.similarity),
                None => candidates.push((s.name, s.similarity)),
            }
        }
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(options.max_recommendations);

    let mut out = Vec::with_capacity(candidates.len());
    for (artist, similarity) in candidates {
        let info = match catalog.artist_info(&artist).await {
            Ok(info) => info.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Error getting info for {artist}: {e}");
                Default::default()
            }
        };

        out.push(Recommendation {
            artist,
            similarity,
            listeners: info.listeners,
            playcount: info.playcount,
            tags: info.tags,
            image: info.image,
        });
    }

    tracing::info!("{} artist recommendations", out.len());
    out
}
