//! gui/update/settings.rs
//! Settings modal: load on open, edit a draft, save to disk.

use iced::Task;

use super::super::state::{Message, MusicScanPro, SettingsDraft};
use super::util::spawn_blocking;
use crate::core::types::Settings;

/// Read the settings file off-thread. Used at startup and when the modal opens.
pub(crate) fn load_settings(state: &MusicScanPro) -> Task<Message> {
    let store = state.settings_store.clone();
    Task::perform(
        spawn_blocking(move || store.load().map_err(|e| e.to_string())),
        Message::SettingsLoaded,
    )
}

pub(crate) fn settings_loaded(
    state: &mut MusicScanPro,
    result: Result<Settings, String>,
) -> Task<Message> {
    match result {
        Ok(settings) => {
            state.settings_draft = SettingsDraft::from_settings(&settings);
            state.settings = settings;
        }
        Err(e) => {
            // Keep whatever is in memory.
            tracing::warn!("{e}");
            if state.settings_open {
                state.error = Some(e);
            }
        }
    }
    Task::none()
}

pub(crate) fn open_settings(state: &mut MusicScanPro) -> Task<Message> {
    state.settings_open = true;
    state.settings_saved = false;
    state.settings_draft = SettingsDraft::from_settings(&state.settings);
    load_settings(state)
}

pub(crate) fn close_settings(state: &mut MusicScanPro) -> Task<Message> {
    state.settings_open = false;
    Task::none()
}

pub(crate) fn api_key_changed(state: &mut MusicScanPro, s: String) -> Task<Message> {
    state.settings_draft.api_key = s;
    Task::none()
}

pub(crate) fn secret_changed(state: &mut MusicScanPro, s: String) -> Task<Message> {
    state.settings_draft.secret = s;
    Task::none()
}

pub(crate) fn save_settings(state: &mut MusicScanPro) -> Task<Message> {
    if state.settings_saving {
        return Task::none();
    }

    state.settings_saving = true;
    state.settings_saved = false;

    let store = state.settings_store.clone();
    let settings = state.settings_draft.to_settings();

    Task::perform(
        spawn_blocking(move || {
            store.save(&settings).map_err(|e| e.to_string())?;
            Ok(settings)
        }),
        Message::SettingsSaved,
    )
}

pub(crate) fn settings_saved(
    state: &mut MusicScanPro,
    result: Result<Settings, String>,
) -> Task<Message> {
    state.settings_saving = false;

    match result {
        Ok(settings) => {
            state.settings_saved = true;
            state.key_saved = settings.api_key().is_some();
            if state.key_saved && state.error.as_deref() == Some(super::compare::NO_API_KEY) {
                state.error = None;
            }
            state.settings = settings;
        }
        Err(e) => state.error = Some(e),
    }
    Task::none()
}

/// Both "saved" confirmations disappear together.
pub(crate) fn hide_saved_notices(state: &mut MusicScanPro) -> Task<Message> {
    state.settings_saved = false;
    state.key_saved = false;
    Task::none()
}
