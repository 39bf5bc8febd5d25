//! gui/subscription.rs
//! Timers: rotate the loading message while busy, hide "saved" notices.

use iced::{Subscription, time};
use std::time::Duration;

use super::state::{Busy, Message, MusicScanPro};

const SCAN_ROTATE: Duration = Duration::from_millis(2000);
const ANALYZE_ROTATE: Duration = Duration::from_millis(2500);
const SAVED_NOTICE: Duration = Duration::from_secs(2);

pub(crate) fn subscription(state: &MusicScanPro) -> Subscription<Message> {
    let loading = match state.busy {
        Some(Busy::Scanning) => {
            time::every(SCAN_ROTATE).map(|_| Message::RotateLoadingMessage)
        }
        Some(Busy::Analyzing) => {
            time::every(ANALYZE_ROTATE).map(|_| Message::RotateLoadingMessage)
        }
        None => Subscription::none(),
    };

    let notices = if state.key_saved || state.settings_saved {
        time::every(SAVED_NOTICE).map(|_| Message::HideSavedNotices)
    } else {
        Subscription::none()
    };

    Subscription::batch([loading, notices])
}
