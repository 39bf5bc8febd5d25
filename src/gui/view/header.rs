//! Dashboard header: actions, banners, and the post-scan prompt.

use iced::widget::{Column, Space, button, column, container, row, text, text_input};
use iced::{Alignment, Color, Element, Length};

use super::super::state::{Message, MusicScanPro};
use super::constants::{HEADING_TEXT, ROW_TEXT, SMALL_TEXT};
use super::widgets::card;

const WARNING: Color = Color::from_rgb(0.98, 0.80, 0.08);

pub(crate) fn build_header(state: &MusicScanPro) -> Column<'_, Message> {
    let idle = state.busy.is_none();

    let settings_btn = button("Settings")
        .on_press(Message::OpenSettings)
        .style(button::secondary);

    let export_btn = button(if state.exporting { "Exporting..." } else { "Export PDF" })
        .on_press_maybe(
            (state.comparison.is_some() && !state.exporting).then_some(Message::ExportPdf),
        )
        .style(button::success);

    let scan_btn = button("Scan New Folder")
        .on_press_maybe(idle.then_some(Message::SelectFolder))
        .style(button::secondary);

    let analyze_label = if state.is_analyzing() {
        "Analyzing..."
    } else if state.comparison.is_some() {
        "Re-analyze with Last.fm"
    } else {
        "Analyze with Last.fm"
    };
    let analyze_btn = button(analyze_label)
        .on_press_maybe((idle && !state.tracks.is_empty()).then_some(Message::Analyze))
        .style(button::primary);

    let actions = row![
        text("Music Collection Analysis").size(HEADING_TEXT),
        Space::new().width(Length::Fill),
        settings_btn,
        export_btn,
        scan_btn,
        analyze_btn,
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut col = column![actions, folder_row(state)].spacing(12);

    for banner in banners(state) {
        col = col.push(banner);
    }

    if !state.tracks.is_empty() && state.comparison.is_none() && idle {
        col = col.push(scan_complete_prompt(state));
    }

    col
}

/// Typed path + Scan, next to the dialog button.
pub(crate) fn folder_row(state: &MusicScanPro) -> Element<'_, Message> {
    let idle = state.busy.is_none();

    let input = text_input("Music folder path", &state.folder_input)
        .on_input(Message::FolderInputChanged)
        .on_submit(Message::ScanTypedFolder)
        .width(Length::Fill);

    let scan = button("Scan")
        .on_press_maybe(
            (idle && !state.folder_input.trim().is_empty()).then_some(Message::ScanTypedFolder),
        )
        .style(button::secondary);

    row![input, scan]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}

/// Warning, confirmation, error, and notice lines (in that order).
pub(crate) fn banners(state: &MusicScanPro) -> Vec<Element<'_, Message>> {
    let mut out = Vec::new();

    if state.settings.api_key().is_none() {
        out.push(
            card(
                row![
                    text("No Last.fm API key configured. Please add one in Settings.")
                        .size(ROW_TEXT)
                        .color(WARNING),
                    Space::new().width(Length::Fill),
                    button("Open Settings")
                        .on_press(Message::OpenSettings)
                        .style(button::secondary),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
            .into(),
        );
    }

    if state.key_saved && state.settings.api_key().is_some() {
        out.push(
            text("Last.fm API key saved!")
                .size(ROW_TEXT)
                .style(text::success)
                .into(),
        );
    }

    if let Some(err) = &state.error {
        out.push(dismissable(text(err).size(ROW_TEXT).style(text::danger).into()));
    }

    if let Some(notice) = &state.notice {
        out.push(dismissable(text(notice).size(ROW_TEXT).into()));
    }

    out
}

fn dismissable(content: Element<'_, Message>) -> Element<'_, Message> {
    card(
        row![
            content,
            Space::new().width(Length::Fill),
            button(text("Dismiss").size(SMALL_TEXT))
                .on_press(Message::DismissBanner)
                .style(button::text),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .into()
}

fn scan_complete_prompt(state: &MusicScanPro) -> Element<'_, Message> {
    let has_key = state.settings.api_key().is_some();

    let hint = if has_key {
        "Press Analyze with Last.fm to discover missing tracks, new albums, and more."
    } else {
        "Add your Last.fm API key in Settings to enable analysis."
    };

    let mut actions = row![].spacing(8);
    if !has_key {
        actions = actions.push(
            button("Open Settings")
                .on_press(Message::OpenSettings)
                .style(button::secondary),
        );
    }
    actions = actions.push(
        button("Analyze with Last.fm")
            .on_press(Message::Analyze)
            .style(button::primary),
    );

    container(
        row![
            column![
                text("Scanning complete!").size(ROW_TEXT),
                text(hint).size(SMALL_TEXT),
            ]
            .spacing(4),
            Space::new().width(Length::Fill),
            actions,
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(16)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
