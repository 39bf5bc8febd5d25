//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, MusicScanPro, Tab};

mod compare;
mod export;
mod scan;
pub(crate) mod settings;
mod util;
mod window;

pub(crate) fn update(state: &mut MusicScanPro, message: Message) -> Task<Message> {
    match message {
        // Window
        Message::Window(action) => window::window_action(action),
        Message::OpenExternal(url) => window::open_external(url),
        Message::ExternalOpened(result) => window::external_opened(state, result),

        // Scan
        Message::FolderInputChanged(s) => scan::folder_input_changed(state, s),
        Message::ScanTypedFolder => scan::scan_typed_folder(state),
        Message::SelectFolder => scan::select_folder(state),
        Message::FolderChosen(folder) => scan::folder_chosen(state, folder),
        Message::ScanFinished(result) => scan::scan_finished(state, result),

        // Compare
        Message::Analyze => compare::analyze(state),
        Message::CompareFinished(result) => compare::compare_finished(state, result),
        Message::ArtistImageLoaded(artist, result) => {
            compare::artist_image_loaded(state, artist, result)
        }

        Message::SelectTab(tab) => select_tab(state, tab),

        // Settings
        Message::OpenSettings => settings::open_settings(state),
        Message::CloseSettings => settings::close_settings(state),
        Message::SettingsLoaded(result) => settings::settings_loaded(state, result),
        Message::ApiKeyChanged(s) => settings::api_key_changed(state, s),
        Message::SecretChanged(s) => settings::secret_changed(state, s),
        Message::SaveSettings => settings::save_settings(state),
        Message::SettingsSaved(result) => settings::settings_saved(state, result),

        // Export
        Message::ExportPdf => export::export_pdf(state),
        Message::ExportPathChosen(path) => export::export_path_chosen(state, path),
        Message::ExportFinished(result) => export::export_finished(state, result),

        // Timers
        Message::RotateLoadingMessage => {
            state.loading_tick = state.loading_tick.wrapping_add(1);
            Task::none()
        }
        Message::HideSavedNotices => settings::hide_saved_notices(state),

        Message::DismissBanner => {
            state.error = None;
            state.notice = None;
            Task::none()
        }
    }
}

fn select_tab(state: &mut MusicScanPro, tab: Tab) -> Task<Message> {
    state.tab = tab;
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborator::{CollaboratorCommand, Collaborators};
    use crate::core::settings::SettingsStore;
    use crate::core::types::{LastFmComparison, Recommendation, Settings, Track};
    use crate::gui::Config;
    use crate::gui::state::Busy;

    fn state() -> MusicScanPro {
        let cmd = CollaboratorCommand::external("true");
        MusicScanPro::new(Config {
            collaborators: Collaborators {
                scanner: cmd.clone(),
                comparator: cmd,
            },
            settings: SettingsStore::new(std::env::temp_dir().join("music-scan-pro-test.json")),
        })
    }

    fn track(artist: &str, album: &str, title: &str) -> Track {
        Track {
            artist: artist.into(),
            album: album.into(),
            track: title.into(),
            file: None,
        }
    }

    fn rec(artist: &str) -> Recommendation {
        Recommendation {
            artist: artist.into(),
            similarity: 0.5,
            listeners: 1,
            playcount: 1,
            tags: Vec::new(),
            image: None,
        }
    }

    #[test]
    fn analyze_without_key_opens_settings() {
        let mut s = state();
        s.tracks = vec![track("A", "B", "C")];

        let _ = update(&mut s, Message::Analyze);

        assert_eq!(s.error.as_deref(), Some(compare::NO_API_KEY));
        assert!(s.settings_open);
        assert_eq!(s.busy, None);
    }

    #[test]
    fn analyze_with_key_goes_busy() {
        let mut s = state();
        s.tracks = vec![track("A", "B", "C")];
        s.settings.lastfm_api_key = Some("key".into());
        s.loading_tick = 7;

        let _ = update(&mut s, Message::Analyze);

        assert!(s.is_analyzing());
        assert_eq!(s.loading_tick, 0);
        assert!(!s.settings_open);
    }

    #[test]
    fn analyze_needs_tracks() {
        let mut s = state();
        s.settings.lastfm_api_key = Some("key".into());
        let _ = update(&mut s, Message::Analyze);
        assert_eq!(s.busy, None);
    }

    #[test]
    fn scan_success_replaces_tracks() {
        let mut s = state();
        s.busy = Some(Busy::Scanning);
        s.tracks = vec![track("Old", "Old", "Old")];
        s.tab = Tab::Songs;

        let _ = update(
            &mut s,
            Message::ScanFinished(Ok(vec![track("A", "B", "C"), track("A", "B", "D")])),
        );

        assert_eq!(s.busy, None);
        assert_eq!(s.tracks.len(), 2);
        assert!(s.has_scanned);
        assert_eq!(s.tab, Tab::Overview);
    }

    #[test]
    fn scan_failure_keeps_previous_tracks() {
        let mut s = state();
        s.busy = Some(Busy::Scanning);
        s.tracks = vec![track("A", "B", "C")];

        let _ = update(&mut s, Message::ScanFinished(Err("boom".into())));

        assert_eq!(s.busy, None);
        assert_eq!(s.tracks.len(), 1);
        assert_eq!(s.error.as_deref(), Some("boom"));
    }

    #[test]
    fn select_folder_drops_analysis() {
        let mut s = state();
        s.comparison = Some(LastFmComparison::default());
        let _ = update(&mut s, Message::SelectFolder);
        assert!(s.comparison.is_none());
    }

    #[test]
    fn cancelled_folder_dialog_changes_nothing() {
        let mut s = state();
        s.tracks = vec![track("A", "B", "C")];
        let _ = update(&mut s, Message::FolderChosen(None));
        assert_eq!(s.busy, None);
        assert_eq!(s.tracks.len(), 1);
    }

    #[test]
    fn typed_folder_starts_scan() {
        let mut s = state();
        let _ = update(&mut s, Message::FolderInputChanged("  /music  ".into()));
        let _ = update(&mut s, Message::ScanTypedFolder);
        assert!(s.is_scanning());
        assert_eq!(s.folder.as_deref(), Some(std::path::Path::new("/music")));
    }

    #[test]
    fn compare_result_replaces_analysis() {
        let mut s = state();
        s.busy = Some(Busy::Analyzing);
        s.comparison = Some(LastFmComparison {
            total_local_tracks: 1,
            ..Default::default()
        });

        let next = LastFmComparison {
            total_local_tracks: 9,
            ..Default::default()
        };
        let _ = update(&mut s, Message::CompareFinished(Ok(next.clone())));

        assert_eq!(s.busy, None);
        assert_eq!(s.comparison, Some(next));
    }

    #[test]
    fn late_image_for_unknown_artist_is_ignored() {
        let mut s = state();
        s.comparison = Some(LastFmComparison {
            recommendations: Some(vec![rec("Known")]),
            ..Default::default()
        });

        let _ = update(&mut s, Message::ArtistImageLoaded("Gone".into(), Ok(vec![1, 2, 3])));
        assert!(s.artist_images.is_empty());

        let _ = update(&mut s, Message::ArtistImageLoaded("Known".into(), Ok(vec![1, 2, 3])));
        assert!(s.artist_images.contains_key("Known"));
    }

    #[test]
    fn rescan_returns_to_overview() {
        let mut s = state();
        let _ = update(&mut s, Message::SelectTab(Tab::Missing));
        assert_eq!(s.tab, Tab::Missing);

        let _ = update(&mut s, Message::ScanFinished(Ok(vec![track("A", "B", "C")])));
        assert_eq!(s.tab, Tab::Overview);
    }

    #[test]
    fn saved_settings_show_both_confirmations() {
        let mut s = state();
        s.settings_saving = true;
        s.error = Some(compare::NO_API_KEY.into());

        let saved = Settings {
            lastfm_api_key: Some("key".into()),
            lastfm_secret: None,
        };
        let _ = update(&mut s, Message::SettingsSaved(Ok(saved.clone())));

        assert!(!s.settings_saving);
        assert!(s.settings_saved);
        assert!(s.key_saved);
        assert_eq!(s.error, None);
        assert_eq!(s.settings, saved);

        let _ = update(&mut s, Message::HideSavedNotices);
        assert!(!s.settings_saved);
        assert!(!s.key_saved);
    }

    #[test]
    fn loaded_settings_fill_the_draft() {
        let mut s = state();
        let loaded = Settings {
            lastfm_api_key: Some("abc".into()),
            lastfm_secret: Some("shh".into()),
        };
        let _ = update(&mut s, Message::SettingsLoaded(Ok(loaded)));
        assert_eq!(s.settings_draft.api_key, "abc");
        assert_eq!(s.settings_draft.secret, "shh");
    }

    #[test]
    fn export_requires_analysis() {
        let mut s = state();
        let _ = update(&mut s, Message::ExportPdf);
        assert!(!s.exporting);

        let _ = update(&mut s, Message::ExportPathChosen(None));
        assert!(!s.exporting);
    }

    #[test]
    fn export_result_sets_banner() {
        let mut s = state();
        s.exporting = true;
        let _ = update(&mut s, Message::ExportFinished(Err("disk full".into())));
        assert!(!s.exporting);
        assert_eq!(s.error.as_deref(), Some("disk full"));

        let _ = update(&mut s, Message::DismissBanner);
        assert_eq!(s.error, None);
    }
}
