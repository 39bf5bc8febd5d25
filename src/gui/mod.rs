//! gui/mod.rs
//!
//! This folder contains ONLY frontend concerns:
//! - app state ('MusicScanPro')
//! - messages ('Message')
//! - update logic ('update()')
//! - view layout ('view()')
//! - subscriptions (loading-message rotation, notice timers)
//! - small UI helpers ('util')

pub(crate) mod state;
pub(crate) mod subscription;
pub(crate) mod update;
pub(crate) mod util;
pub(crate) mod view;

use crate::core::collaborator::Collaborators;
use crate::core::settings::SettingsStore;

// Re-export the entry points run() needs.
pub(crate) use state::MusicScanPro;
pub(crate) use subscription::subscription;
pub(crate) use update::update;
pub(crate) use view::view;

/// Everything the window needs from the command line.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub collaborators: Collaborators,
    pub settings: SettingsStore,
}

/// Open the window and block until it closes.
pub(crate) fn run(config: Config) -> iced::Result {
    iced::application(move || MusicScanPro::boot(config.clone()), update, view)
        .title("Music Scan Pro")
        .subscription(subscription)
        .theme(view::theme)
        .decorations(false)
        .window_size(iced::Size::new(1200.0, 800.0))
        .run()
}
