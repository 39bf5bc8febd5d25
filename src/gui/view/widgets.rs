//! Reusable small widgets/helpers used across view modules.

use iced::widget::{Space, button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use super::super::state::{Message, MusicScanPro};
use super::constants::{ARTIST_IMAGE, ROW_TEXT, SECTION_TEXT, SMALL_TEXT, STAT_TEXT};

/// Bordered box around a section.
pub(crate) fn card<'a>(content: impl Into<Element<'a, Message>>) -> container::Container<'a, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box)
}

/// Big number over a caption ("1,234" / "Tracks").
pub(crate) fn stat<'a>(value: String, label: &'a str) -> Element<'a, Message> {
    column![text(value).size(STAT_TEXT), text(label).size(ROW_TEXT)]
        .spacing(4)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
}

/// Artist heading with a right-aligned badge ("3 missing").
pub(crate) fn group_header(artist: String, badge: String) -> Element<'static, Message> {
    row![
        text(artist).size(SECTION_TEXT),
        Space::new().width(Length::Fill),
        container(text(badge).size(SMALL_TEXT))
            .padding([2, 8])
            .style(container::bordered_box),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// One clickable row that opens a Last.fm page.
///
/// `detail` sits next to the title (year, album), `trailing` on the right (play count).
pub(crate) fn link_row(
    title: String,
    detail: Option<String>,
    trailing: Option<String>,
    url: String,
) -> Element<'static, Message> {
    let mut left = row![text(title).size(ROW_TEXT)]
        .spacing(8)
        .align_y(Alignment::Center);
    if let Some(detail) = detail {
        left = left.push(text(detail).size(SMALL_TEXT));
    }

    let mut line = row![left, Space::new().width(Length::Fill)]
        .spacing(8)
        .align_y(Alignment::Center);
    if let Some(trailing) = trailing {
        line = line.push(text(trailing).size(SMALL_TEXT));
    }

    button(line)
        .on_press(Message::OpenExternal(url))
        .width(Length::Fill)
        .style(button::text)
        .into()
}

/// Shown in the analysis tabs until a comparison exists.
pub(crate) fn no_analysis<'a>(state: &MusicScanPro, what: &'a str) -> Element<'a, Message> {
    let analyze = button(if state.is_analyzing() {
        "Analyzing..."
    } else {
        "Analyze with Last.fm"
    })
    .on_press_maybe((state.busy.is_none() && !state.tracks.is_empty()).then_some(Message::Analyze))
    .style(button::primary);

    container(
        column![
            text("No Analysis Yet").size(SECTION_TEXT),
            text(format!("Click \"Analyze with Last.fm\" to discover {what}")).size(ROW_TEXT),
            analyze,
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(40)
    .center_x(Length::Fill)
    .into()
}

/// Centered one-line message for an empty result list.
pub(crate) fn empty_message(message: &str) -> Element<'_, Message> {
    container(text(message).size(ROW_TEXT))
        .padding(40)
        .center_x(Length::Fill)
        .into()
}

/// Artist photo, or an initial while the download is pending or failed.
pub(crate) fn artist_thumb(handle: Option<&image::Handle>, artist: &str) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(ARTIST_IMAGE))
            .height(Length::Fixed(ARTIST_IMAGE))
            .center_x(Length::Fixed(ARTIST_IMAGE))
            .center_y(Length::Fixed(ARTIST_IMAGE))
            .into(),
        None => {
            let initial = artist
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string());
            container(text(initial).size(SECTION_TEXT))
                .width(Length::Fixed(ARTIST_IMAGE))
                .height(Length::Fixed(ARTIST_IMAGE))
                .center_x(Length::Fixed(ARTIST_IMAGE))
                .center_y(Length::Fixed(ARTIST_IMAGE))
                .style(container::rounded_box)
                .into()
        }
    }
}
