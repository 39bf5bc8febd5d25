//! Overview tab: collection totals and one card per analysis section.

use iced::widget::{button, column, row, text};
use iced::{Element, Length};

use super::super::state::{Message, MusicScanPro, Tab};
use super::constants::{ROW_TEXT, SECTION_TEXT, STAT_TEXT};
use super::widgets::{card, stat};
use crate::core::stats::{CollectionStats, group_thousands};

pub(crate) fn build_overview(state: &MusicScanPro) -> Element<'_, Message> {
    let stats = CollectionStats::from_tracks(&state.tracks);

    let totals = card(
        column![
            text("Your Collection").size(SECTION_TEXT),
            row![
                stat(group_thousands(stats.total_tracks as u64), "Tracks"),
                stat(group_thousands(stats.total_artists as u64), "Artists"),
                stat(group_thousands(stats.total_albums as u64), "Albums"),
            ]
            .spacing(16),
        ]
        .spacing(12),
    );

    let mut col = column![totals].spacing(16);

    if let Some(c) = &state.comparison {
        let recs = c.recommendations.as_ref().map_or(0, Vec::len);

        col = col.push(
            row![
                section_card("Missing Tracks", c.missing_tracks.len(), "popular tracks you don't have", Tab::Missing),
                section_card("Popular Albums", c.new_albums.len(), "popular albums to explore", Tab::Albums),
            ]
            .spacing(16),
        );
        col = col.push(
            row![
                section_card("Popular Songs", c.new_songs.len(), "popular singles & tracks", Tab::Songs),
                section_card("Artist Recommendations", recs, "artists similar to your taste", Tab::Recommendations),
            ]
            .spacing(16),
        );
    }

    col.into()
}

/// Clicking the card jumps to its tab.
fn section_card(
    title: &'static str,
    count: usize,
    caption: &'static str,
    tab: Tab,
) -> Element<'static, Message> {
    button(
        column![
            text(title).size(SECTION_TEXT),
            text(group_thousands(count as u64)).size(STAT_TEXT),
            text(caption).size(ROW_TEXT),
        ]
        .spacing(8),
    )
    .on_press(Message::SelectTab(tab))
    .padding(16)
    .width(Length::Fill)
    .style(button::secondary)
    .into()
}
