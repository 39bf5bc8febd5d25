//! Last.fm API client (`ws.audioscrobbler.com/2.0`, JSON format).
//!
//! Last.fm quirks handled here:
//! - numbers often arrive as strings ("playcount": "1234")
//! - single-element lists sometimes arrive as a bare object
//! - errors come back as `{ "error": 6, "message": "..." }` with HTTP 200

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use url::Url;

use super::super::error::LastFmError;
use super::{ArtistInfo, ArtistMatch, Catalog, CatalogAlbum, CatalogTrack, Period, SimilarArtist};

pub const LASTFM_API: &str = "https://ws.audioscrobbler.com/2.0/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("music-scan-pro/", env!("CARGO_PKG_VERSION"));

/// HTTP implementation of [`Catalog`].
pub struct LastFmClient {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl LastFmClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LastFmError> {
        Self::with_base_url(api_key, LASTFM_API)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, LastFmError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: Url::parse(base_url)?,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, LastFmError> {
        tracing::debug!("Last.fm {method} {params:?}");

        let value: Value = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .query(params)
            .send()
            .await?
            .json()
            .await?;

        decode(value)
    }
}

/// Download an artist image (recommendation cards).
pub async fn fetch_image(url: &str) -> Result<Vec<u8>, LastFmError> {
    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    Ok(bytes.to_vec())
}

/// Split an API error object from a payload.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T, LastFmError> {
    if let Some(code) = value.get("error").and_then(Value::as_i64) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(LastFmError::Api { code, message });
    }

    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl Catalog for LastFmClient {
    async fn search_artist(&self, artist: &str) -> Result<Option<ArtistMatch>, LastFmError> {
        let resp: SearchResponse = self
            .call("artist.search", &[("artist", artist), ("limit", "5")])
            .await?;

        let matches = resp.results.artistmatches.artist.into_vec();
        let wanted = artist.to_lowercase();

        let best = matches
            .iter()
            .position(|a| a.name.to_lowercase() == wanted)
            .or(if matches.is_empty() { None } else { Some(0) });

        Ok(best.map(|i| ArtistMatch {
            name: matches[i].name.clone(),
            listeners: matches[i].listeners,
        }))
    }

    async fn top_albums(&self, artist: &str, limit: u32) -> Result<Vec<CatalogAlbum>, LastFmError> {
        let limit = limit.to_string();
        let resp: TopAlbumsResponse = self
            .call("artist.gettopalbums", &[("artist", artist), ("limit", &limit)])
            .await?;

        Ok(resp
            .topalbums
            .album
            .into_vec()
            .into_iter()
            .map(|a| CatalogAlbum {
                name: a.name,
                playcount: a.playcount,
            })
            .collect())
    }

    async fn top_tracks(
        &self,
        artist: &str,
        period: Period,
        limit: u32,
    ) -> Result<Vec<CatalogTrack>, LastFmError> {
        let limit = limit.to_string();
        let mut params = vec![("artist", artist), ("limit", limit.as_str())];
        if period != Period::Overall {
            params.push(("period", period.as_param()));
        }

        let resp: TopTracksResponse = self.call("artist.gettoptracks", &params).await?;

        Ok(resp
            .toptracks
            .track
            .into_vec()
            .into_iter()
            .map(|t| CatalogTrack {
                name: t.name,
                playcount: t.playcount,
            })
            .collect())
    }

    async fn album_tracks(&self, artist: &str, album: &str) -> Result<Vec<String>, LastFmError> {
        let resp: AlbumInfoResponse = self
            .call("album.getinfo", &[("artist", artist), ("album", album)])
            .await?;

        Ok(resp
            .album
            .tracks
            .track
            .into_vec()
            .into_iter()
            .map(|t| t.name)
            .collect())
    }

    async fn similar_artists(
        &self,
        artist: &str,
        limit: u32,
    ) -> Result<Vec<SimilarArtist>, LastFmError> {
        let limit = limit.to_string();
        let resp: SimilarResponse = self
            .call("artist.getsimilar", &[("artist", artist), ("limit", &limit)])
            .await?;

        Ok(resp
            .similarartists
            .artist
            .into_vec()
            .into_iter()
            .map(|a| SimilarArtist {
                name: a.name,
                similarity: a.similarity,
            })
            .collect())
    }

    async fn artist_info(&self, artist: &str) -> Result<Option<ArtistInfo>, LastFmError> {
        let resp: ArtistInfoResponse = match self.call("artist.getinfo", &[("artist", artist)]).await
        {
            Ok(r) => r,
            // 6 = "The artist you supplied could not be found"
            Err(LastFmError::Api { code: 6, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let a = resp.artist;
        Ok(Some(ArtistInfo {
            listeners: a.stats.listeners,
            playcount: a.stats.playcount,
            tags: a.tags.tag.into_vec().into_iter().map(|t| t.name).take(5).collect(),
            image: largest_image(a.image),
        }))
    }
}

/// Last.fm lists images small -> mega; take the last non-empty one.
fn largest_image(images: Vec<Image>) -> Option<String> {
    images
        .into_iter()
        .rev()
        .map(|i| i.url)
        .find(|u| !u.trim().is_empty())
}

// Wire types

/// A list that may arrive as `[...]`, as a bare object, or be missing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

/// Accept `123`, `"123"`, or garbage (-> 0).
fn lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Accept `0.5`, `"0.5"`, or garbage (-> 0.0).
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResults {
    #[serde(default)]
    artistmatches: ArtistMatches,
}

#[derive(Debug, Default, Deserialize)]
struct ArtistMatches {
    #[serde(default)]
    artist: OneOrMany<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    listeners: u64,
}

#[derive(Debug, Deserialize)]
struct TopAlbumsResponse {
    #[serde(default)]
    topalbums: TopAlbums,
}

#[derive(Debug, Default, Deserialize)]
struct TopAlbums {
    #[serde(default)]
    album: OneOrMany<CountedEntry>,
}

#[derive(Debug, Deserialize)]
struct CountedEntry {
    name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    playcount: u64,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    toptracks: TopTracks,
}

#[derive(Debug, Default, Deserialize)]
struct TopTracks {
    #[serde(default)]
    track: OneOrMany<CountedEntry>,
}

#[derive(Debug, Deserialize)]
struct AlbumInfoResponse {
    #[serde(default)]
    album: AlbumInfo,
}

#[derive(Debug, Default, Deserialize)]
struct AlbumInfo {
    #[serde(default)]
    tracks: AlbumTracks,
}

#[derive(Debug, Default, Deserialize)]
struct AlbumTracks {
    #[serde(default)]
    track: OneOrMany<NameOnly>,
}

#[derive(Debug, Deserialize)]
struct NameOnly {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SimilarResponse {
    #[serde(default)]
    similarartists: SimilarArtists,
}

#[derive(Debug, Default, Deserialize)]
struct SimilarArtists {
    #[serde(default)]
    artist: OneOrMany<SimilarEntry>,
}

#[derive(Debug, Deserialize)]
struct SimilarEntry {
    name: String,
    #[serde(rename = "match", default, deserialize_with = "lenient_f64")]
    similarity: f64,
}

#[derive(Debug, Deserialize)]
struct ArtistInfoResponse {
    artist: ArtistInfoEntry,
}

#[derive(Debug, Deserialize)]
struct ArtistInfoEntry {
    #[serde(default)]
    image: Vec<Image>,
    #[serde(default)]
    stats: Stats,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Deserialize)]
struct Image {
    #[serde(rename = "#text", default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct Stats {
    #[serde(default, deserialize_with = "lenient_u64")]
    listeners: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    playcount: u64,
}

#[derive(Debug, Default, Deserialize)]
struct Tags {
    #[serde(default)]
    tag: OneOrMany<NameOnly>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_object_is_an_error() {
        let err = decode::<TopTracksResponse>(json!({
            "error": 10,
            "message": "Invalid API key - You must be granted a valid key by last.fm"
        }))
        .unwrap_err();

        assert!(matches!(err, LastFmError::Api { code: 10, .. }));
    }

    #[test]
    fn string_counts_and_single_objects_decode() {
        let resp: TopTracksResponse = decode(json!({
            "toptracks": { "track": { "name": "Only One", "playcount": "4321" } }
        }))
        .unwrap();

        let tracks = resp.toptracks.track.into_vec();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].playcount, 4321);
    }

    #[test]
    fn numeric_album_playcounts_decode() {
        let resp: TopAlbumsResponse = decode(json!({
            "topalbums": { "album": [
                { "name": "OK Computer", "playcount": 98765432 },
                { "name": "(null)", "playcount": "oops" }
            ] }
        }))
        .unwrap();

        let albums = resp.topalbums.album.into_vec();
        assert_eq!(albums[0].playcount, 98_765_432);
        assert_eq!(albums[1].playcount, 0);
    }

    #[test]
    fn artist_info_picks_largest_image_and_tags() {
        let resp: ArtistInfoResponse = decode(json!({
            "artist": {
                "name": "Boards of Canada",
                "image": [
                    { "#text": "https://img/s.png", "size": "small" },
                    { "#text": "https://img/xl.png", "size": "extralarge" },
                    { "#text": "", "size": "mega" }
                ],
                "stats": { "listeners": "1000", "playcount": "50000" },
                "tags": { "tag": [ { "name": "electronic" }, { "name": "idm" } ] }
            }
        }))
        .unwrap();

        assert_eq!(
            largest_image(resp.artist.image).as_deref(),
            Some("https://img/xl.png")
        );
        assert_eq!(resp.artist.stats.playcount, 50_000);
        assert_eq!(resp.artist.tags.tag.into_vec().len(), 2);
    }

    #[test]
    fn similar_match_is_parsed_from_string() {
        let resp: SimilarResponse = decode(json!({
            "similarartists": { "artist": [ { "name": "Autechre", "match": "0.87" } ] }
        }))
        .unwrap();

        let similar = resp.similarartists.artist.into_vec();
        assert!((similar[0].similarity - 0.87).abs() < 1e-9);
    }

    #[test]
    fn empty_album_info_has_no_tracks() {
        let resp: AlbumInfoResponse = decode(json!({ "album": { "name": "Demo" } })).unwrap();
        assert!(resp.album.tracks.track.into_vec().is_empty());
    }
}
