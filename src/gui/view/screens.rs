//! Full-page screens: welcome (nothing scanned yet) and loading.

use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

use super::super::state::{Busy, Message, MusicScanPro};
use super::super::util::loading_message;
use super::constants::{HEADING_TEXT, ROW_TEXT, SECTION_TEXT, SMALL_TEXT, WELCOME_W};
use super::header::{banners, folder_row};

pub(crate) fn build_loading(state: &MusicScanPro, busy: Busy) -> Element<'_, Message> {
    let what = match busy {
        Busy::Scanning => "Scanning",
        Busy::Analyzing => "Talking to Last.fm",
    };

    let mut col = column![
        text("Music Scan Pro").size(HEADING_TEXT),
        text("Your rock music analysis companion").size(SMALL_TEXT),
        text(loading_message(busy, state.loading_tick)).size(SECTION_TEXT),
        text(what).size(SMALL_TEXT),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    if let (Busy::Scanning, Some(folder)) = (busy, &state.folder) {
        col = col.push(text(folder.display().to_string()).size(SMALL_TEXT));
    }

    container(col)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

pub(crate) fn build_welcome(state: &MusicScanPro) -> Element<'_, Message> {
    let select = button(text("Select Music Folder").size(SECTION_TEXT))
        .on_press(Message::SelectFolder)
        .padding([10, 24])
        .style(button::primary);

    let mut col = column![
        text("Welcome to Music Scan Pro").size(HEADING_TEXT),
        text("Start by scanning your music folder to analyze your collection with Last.fm")
            .size(ROW_TEXT),
        column![
            text("- Supports MP3 files with ID3 tags").size(SMALL_TEXT),
            text("- Finds missing tracks from your favorite albums").size(SMALL_TEXT),
            text("- Discovers new releases from your artists").size(SMALL_TEXT),
            text("- Shows popular singles you might be missing").size(SMALL_TEXT),
        ]
        .spacing(4),
        select,
        folder_row(state),
        button("Settings")
            .on_press(Message::OpenSettings)
            .style(button::text),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .width(Length::Fixed(WELCOME_W));

    for banner in banners(state) {
        col = col.push(banner);
    }

    container(col)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
