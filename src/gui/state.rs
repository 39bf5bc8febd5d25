//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::collections::HashMap;
use std::path::PathBuf;

use iced::Task;
use iced::widget::image;

use super::Config;
use crate::core::collaborator::Collaborators;
use crate::core::settings::SettingsStore;
use crate::core::types::{LastFmComparison, Settings, Track};

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Tab {
    #[default]
    Overview,
    Missing,
    Albums,
    Songs,
    Recommendations,
}

impl Tab {
    pub(crate) const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Missing,
        Tab::Albums,
        Tab::Songs,
        Tab::Recommendations,
    ];
}

/// Custom title bar buttons (the window has no native decorations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowAction {
    Drag,
    Minimize,
    ToggleMaximize,
    Close,
}

/// What the loading screen is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Busy {
    Scanning,
    Analyzing,
}

/// Settings modal form (strings, so the user can type anything).
#[derive(Debug, Default, Clone)]
pub(crate) struct SettingsDraft {
    pub api_key: String,
    pub secret: String,
}

impl SettingsDraft {
    pub(crate) fn from_settings(s: &Settings) -> Self {
        Self {
            api_key: s.lastfm_api_key.clone().unwrap_or_default(),
            secret: s.lastfm_secret.clone().unwrap_or_default(),
        }
    }

    /// Blank fields are dropped so they are omitted from the file.
    pub(crate) fn to_settings(&self) -> Settings {
        let keep = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Settings {
            lastfm_api_key: keep(&self.api_key),
            lastfm_secret: keep(&self.secret),
        }
    }
}

/// App state
pub(crate) struct MusicScanPro {
    pub collaborators: Collaborators,
    pub settings_store: SettingsStore,

    // Scan
    pub folder_input: String,
    pub folder: Option<PathBuf>,
    pub tracks: Vec<Track>,
    pub has_scanned: bool,

    // Analysis (replaced wholesale, never merged)
    pub comparison: Option<LastFmComparison>,
    pub artist_images: HashMap<String, image::Handle>,

    // Background work + loading screen
    pub busy: Option<Busy>,
    pub exporting: bool,
    pub loading_tick: usize,

    // Banners
    pub error: Option<String>,
    pub notice: Option<String>,
    pub key_saved: bool,

    // UI
    pub tab: Tab,

    // Settings
    pub settings: Settings,
    pub settings_open: bool,
    pub settings_draft: SettingsDraft,
    pub settings_saving: bool,
    pub settings_saved: bool,
}

impl MusicScanPro {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            collaborators: config.collaborators,
            settings_store: config.settings,

            folder_input: String::new(),
            folder: None,
            tracks: Vec::new(),
            has_scanned: false,

            comparison: None,
            artist_images: HashMap::new(),

            busy: None,
            exporting: false,
            loading_tick: 0,

            error: None,
            notice: None,
            key_saved: false,

            tab: Tab::Overview,

            settings: Settings::default(),
            settings_open: false,
            settings_draft: SettingsDraft::default(),
            settings_saving: false,
            settings_saved: false,
        }
    }

    /// Initial state + the startup settings load.
    pub(crate) fn boot(config: Config) -> (Self, Task<Message>) {
        let state = Self::new(config);
        let task = super::update::settings::load_settings(&state);
        (state, task)
    }

    pub(crate) fn is_scanning(&self) -> bool {
        self.busy == Some(Busy::Scanning)
    }

    pub(crate) fn is_analyzing(&self) -> bool {
        self.busy == Some(Busy::Analyzing)
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Window
    Window(WindowAction),
    OpenExternal(String),
    ExternalOpened(Result<(), String>),

    // Scan
    FolderInputChanged(String),
    ScanTypedFolder,
    SelectFolder,
    FolderChosen(Option<PathBuf>),
    ScanFinished(Result<Vec<Track>, String>),

    // Compare
    Analyze,
    CompareFinished(Result<LastFmComparison, String>),
    ArtistImageLoaded(String, Result<Vec<u8>, String>),

    // Tabs
    SelectTab(Tab),

    // Settings
    OpenSettings,
    CloseSettings,
    SettingsLoaded(Result<Settings, String>),
    ApiKeyChanged(String),
    SecretChanged(String),
    SaveSettings,
    SettingsSaved(Result<Settings, String>),

    // Export
    ExportPdf,
    ExportPathChosen(Option<PathBuf>),
    ExportFinished(Result<PathBuf, String>),

    // Timers
    RotateLoadingMessage,
    HideSavedNotices,

    DismissBanner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_drops_blank_fields() {
        let draft = SettingsDraft {
            api_key: "  abc  ".into(),
            secret: "   ".into(),
        };
        let s = draft.to_settings();
        assert_eq!(s.lastfm_api_key.as_deref(), Some("abc"));
        assert_eq!(s.lastfm_secret, None);
    }

    #[test]
    fn draft_round_trips_settings() {
        let s = Settings {
            lastfm_api_key: Some("key".into()),
            lastfm_secret: Some("secret".into()),
        };
        assert_eq!(SettingsDraft::from_settings(&s).to_settings(), s);
    }
}
