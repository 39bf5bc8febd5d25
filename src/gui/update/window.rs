//! gui/update/window.rs
//! Title bar actions and external links.

use iced::{Task, window};

use super::super::state::{Message, MusicScanPro, WindowAction};
use super::util::spawn_blocking;
use crate::core::links;

pub(crate) fn window_action(action: WindowAction) -> Task<Message> {
    match action {
        WindowAction::Drag => window::latest().and_then(window::drag),
        WindowAction::Minimize => window::latest().and_then(|id| window::minimize(id, true)),
        WindowAction::ToggleMaximize => window::latest().and_then(window::toggle_maximize),
        WindowAction::Close => window::latest().and_then(window::close),
    }
}

pub(crate) fn open_external(url: String) -> Task<Message> {
    Task::perform(
        spawn_blocking(move || links::open_external(&url)),
        Message::ExternalOpened,
    )
}

pub(crate) fn external_opened(state: &mut MusicScanPro, result: Result<(), String>) -> Task<Message> {
    if let Err(e) = result {
        state.error = Some(e);
    }
    Task::none()
}
