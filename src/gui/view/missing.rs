//! Missing Tracks tab: artist -> album -> track, first-appearance order.

use iced::widget::{Column, column, text};
use iced::Element;

use super::super::state::Message;
use super::super::util::{album_or_unknown, missing_empty_message};
use super::constants::{GROUP_SPACING, ROW_SPACING, ROW_TEXT};
use super::widgets::{card, empty_message, group_header, link_row};
use crate::core::links;
use crate::core::stats::group_missing;
use crate::core::types::LastFmComparison;

pub(crate) fn build_missing(comparison: &LastFmComparison) -> Element<'static, Message> {
    if let Some(message) = missing_empty_message(comparison) {
        return empty_message(message);
    }
    let groups = group_missing(&comparison.missing_tracks);

    let mut col = Column::new().spacing(GROUP_SPACING);

    for group in groups {
        let missing = group.leaf_count();
        let mut artist_col =
            column![group_header(group.artist, format!("{missing} missing"))].spacing(10);

        for album in group.items {
            let heading = album_or_unknown(&album.album).to_string();
            let mut album_col = column![text(heading).size(ROW_TEXT)].spacing(ROW_SPACING);

            for t in album.items {
                let url = links::track_url(&t.artist, &t.track);
                album_col = album_col.push(link_row(
                    t.track,
                    t.year.map(|y| y.to_string()),
                    None,
                    url,
                ));
            }
            artist_col = artist_col.push(album_col);
        }

        col = col.push(card(artist_col));
    }

    col.into()
}
