//! gui/update/compare.rs
//! Last.fm analysis: API key check, comparator process, artist images.

use iced::Task;

use super::super::state::{Busy, Message, MusicScanPro};
use crate::core::collaborator;
use crate::core::lastfm::client::fetch_image;
use crate::core::types::LastFmComparison;

pub(crate) const NO_API_KEY: &str = "Please configure your Last.fm API key in Settings.";

pub(crate) fn analyze(state: &mut MusicScanPro) -> Task<Message> {
    if state.busy.is_some() || state.tracks.is_empty() {
        return Task::none();
    }

    let Some(api_key) = state.settings.api_key().map(str::to_string) else {
        state.error = Some(NO_API_KEY.to_string());
        return super::settings::open_settings(state);
    };

    state.busy = Some(Busy::Analyzing);
    state.loading_tick = 0;
    state.error = None;
    state.notice = None;

    let comparator = state.collaborators.comparator.clone();
    let tracks = state.tracks.clone();

    Task::perform(
        async move {
            collaborator::run_compare(&comparator, &tracks, Some(&api_key))
                .await
                .map_err(|e| e.to_string())
        },
        Message::CompareFinished,
    )
}

pub(crate) fn compare_finished(
    state: &mut MusicScanPro,
    result: Result<LastFmComparison, String>,
) -> Task<Message> {
    state.busy = None;

    match result {
        Ok(comparison) => {
            let images = image_tasks(&comparison);
            state.comparison = Some(comparison);
            state.artist_images.clear();
            images
        }
        Err(e) => {
            state.error = Some(e);
            Task::none()
        }
    }
}

/// One download per recommendation that has an image URL.
fn image_tasks(comparison: &LastFmComparison) -> Task<Message> {
    let Some(recs) = &comparison.recommendations else {
        return Task::none();
    };

    Task::batch(recs.iter().filter_map(|r| {
        let url = r.image.clone()?;
        let artist = r.artist.clone();
        Some(Task::perform(
            async move { fetch_image(&url).await.map_err(|e| e.to_string()) },
            move |result| Message::ArtistImageLoaded(artist, result),
        ))
    }))
}

pub(crate) fn artist_image_loaded(
    state: &mut MusicScanPro,
    artist: String,
    result: Result<Vec<u8>, String>,
) -> Task<Message> {
    let wanted = state
        .comparison
        .as_ref()
        .and_then(|c| c.recommendations.as_ref())
        .is_some_and(|recs| recs.iter().any(|r| r.artist == artist));
    if !wanted {
        // Late reply for an analysis that has been replaced.
        return Task::none();
    }

    match result {
        Ok(bytes) => {
            state
                .artist_images
                .insert(artist, iced::widget::image::Handle::from_bytes(bytes));
        }
        // The card falls back to its placeholder.
        Err(e) => tracing::debug!("Image for {artist} failed: {e}"),
    }
    Task::none()
}
