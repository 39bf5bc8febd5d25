//! gui/update/scan.rs
//! Scan lifecycle + async boundary.
//!
//! - "Scan New Folder" drops the current analysis, then asks for a folder
//!   (native dialog) or takes the typed path.
//! - The scanner runs as a child process (`core::collaborator::run_scan`).
//! - Dialog cancel changes nothing.

use std::path::PathBuf;

use iced::Task;

use super::super::state::{Busy, Message, MusicScanPro, Tab};
use crate::core::collaborator;
use crate::core::types::Track;

pub(crate) fn folder_input_changed(state: &mut MusicScanPro, s: String) -> Task<Message> {
    state.folder_input = s;
    Task::none()
}

pub(crate) fn select_folder(state: &mut MusicScanPro) -> Task<Message> {
    if state.busy.is_some() {
        return Task::none();
    }

    state.comparison = None;
    state.artist_images.clear();

    Task::perform(pick_folder(), Message::FolderChosen)
}

pub(crate) fn scan_typed_folder(state: &mut MusicScanPro) -> Task<Message> {
    let input = state.folder_input.trim();
    if input.is_empty() || state.busy.is_some() {
        return Task::none();
    }

    let folder = PathBuf::from(input);
    state.comparison = None;
    state.artist_images.clear();
    start_scan(state, folder)
}

async fn pick_folder() -> Option<PathBuf> {
    tracing::debug!("Open rfd::AsyncFileDialog");
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Select your music folder")
        .pick_folder()
        .await;
    tracing::debug!("rfd::AsyncFileDialog closed");

    handle.map(|h| h.path().to_path_buf())
}

pub(crate) fn folder_chosen(state: &mut MusicScanPro, folder: Option<PathBuf>) -> Task<Message> {
    match folder {
        Some(folder) => start_scan(state, folder),
        // Canceled: keep whatever is on screen.
        None => Task::none(),
    }
}

fn start_scan(state: &mut MusicScanPro, folder: PathBuf) -> Task<Message> {
    if state.busy.is_some() {
        return Task::none();
    }

    state.busy = Some(Busy::Scanning);
    state.loading_tick = 0;
    state.error = None;
    state.notice = None;
    state.folder_input = folder.display().to_string();
    state.folder = Some(folder.clone());

    let scanner = state.collaborators.scanner.clone();

    Task::perform(
        async move {
            collaborator::run_scan(&scanner, &folder)
                .await
                .map_err(|e| e.to_string())
        },
        Message::ScanFinished,
    )
}

pub(crate) fn scan_finished(
    state: &mut MusicScanPro,
    result: Result<Vec<Track>, String>,
) -> Task<Message> {
    state.busy = None;

    match result {
        Ok(tracks) => {
            tracing::info!("Loaded {} tracks", tracks.len());
            state.tracks = tracks;
            state.has_scanned = true;
            state.tab = Tab::Overview;
        }
        Err(e) => {
            // Keep previous tracks; just report error.
            state.error = Some(e);
        }
    }

    Task::none()
}
