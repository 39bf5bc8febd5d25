//! core/lastfm/mod.rs
//!
//! Built-in comparator: reconcile local tracks against the Last.fm catalog.
//!
//! - [`Catalog`] is the seam: the queries the comparison needs
//! - [`client::LastFmClient`] implements it over HTTP
//! - [`compare::compare_collection`] is the classification logic

pub mod client;
pub mod compare;
pub mod fuzzy;

use async_trait::async_trait;

use super::error::LastFmError;

pub use client::LastFmClient;
pub use compare::{CompareOptions, compare_collection};

/// An artist found by `artist.search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistMatch {
    pub name: String,
    pub listeners: u64,
}

/// One entry of `artist.gettopalbums`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAlbum {
    pub name: String,
    pub playcount: u64,
}

/// One entry of `artist.gettoptracks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    pub name: String,
    pub playcount: u64,
}

/// One entry of `artist.getsimilar`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarArtist {
    pub name: String,
    pub similarity: f64,
}

/// The parts of `artist.getinfo` used for recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInfo {
    pub listeners: u64,
    pub playcount: u64,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

/// Ranking window for top tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Overall,
    OneMonth,
}

impl Period {
    pub fn as_param(self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::OneMonth => "1month",
        }
    }
}

/// Catalog queries needed by the comparison.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_artist(&self, artist: &str) -> Result<Option<ArtistMatch>, LastFmError>;

    async fn top_albums(&self, artist: &str, limit: u32) -> Result<Vec<CatalogAlbum>, LastFmError>;

    async fn top_tracks(
        &self,
        artist: &str,
        period: Period,
        limit: u32,
    ) -> Result<Vec<CatalogTrack>, LastFmError>;

    /// Track names of one album, in album order.
    async fn album_tracks(&self, artist: &str, album: &str) -> Result<Vec<String>, LastFmError>;

    async fn similar_artists(
        &self,
        artist: &str,
        limit: u32,
    ) -> Result<Vec<SimilarArtist>, LastFmError>;

    async fn artist_info(&self, artist: &str) -> Result<Option<ArtistInfo>, LastFmError>;
}
