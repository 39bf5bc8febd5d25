//! Last.fm web links and opening them in the system browser.

use url::Url;

const LASTFM_MUSIC: &str = "https://www.last.fm/music/";

/// Where to get API credentials (shown in the settings modal).
pub const LASTFM_API_ACCOUNT_URL: &str = "https://www.last.fm/api/account/create";

fn music_url(segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse(LASTFM_MUSIC) else {
        return format!("{LASTFM_MUSIC}{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments);
    }
    url.to_string()
}

/// `https://www.last.fm/music/<artist>`
pub fn artist_url(artist: &str) -> String {
    music_url(&[artist])
}

/// `https://www.last.fm/music/<artist>/_/<track>`
pub fn track_url(artist: &str, track: &str) -> String {
    music_url(&[artist, "_", track])
}

/// `https://www.last.fm/music/<artist>/<album>`
pub fn album_url(artist: &str, album: &str) -> String {
    music_url(&[artist, album])
}

/// Hand the URL to the OS. Errors are returned as display text for the banner.
pub fn open_external(url: &str) -> Result<(), String> {
    tracing::debug!("Opening {url}");
    open::that(url).map_err(|e| format!("Failed to open {url}: {e}"))
}
