//! Popular Albums / Popular Songs tabs (grouped by artist, play counts on the right).

use iced::Element;
use iced::widget::{Column, column};

use super::super::state::Message;
use super::constants::GROUP_SPACING;
use super::widgets::{card, empty_message, group_header, link_row};
use crate::core::links;
use crate::core::stats::{group_by_artist, group_thousands};
use crate::core::types::{NewAlbum, NewSong};

pub(crate) fn build_albums(albums: &[NewAlbum]) -> Element<'static, Message> {
    let groups = group_by_artist(albums, |a| a.artist.as_str());
    if groups.is_empty() {
        return empty_message("No popular albums found. You have all the hits!");
    }

    let mut col = Column::new().spacing(GROUP_SPACING);
    for group in groups {
        let badge = format!("{} popular", group.items.len());
        let mut artist_col = column![group_header(group.artist, badge)].spacing(8);

        for a in group.items {
            let url = links::album_url(&a.artist, &a.album);
            artist_col = artist_col.push(link_row(
                a.album,
                a.year.map(|y| y.to_string()),
                Some(plays(a.playcount)),
                url,
            ));
        }
        col = col.push(card(artist_col));
    }

    col.into()
}

pub(crate) fn build_songs(songs: &[NewSong]) -> Element<'static, Message> {
    let groups = group_by_artist(songs, |s| s.artist.as_str());
    if groups.is_empty() {
        return empty_message("No popular songs found. You have all the hits!");
    }

    let mut col = Column::new().spacing(GROUP_SPACING);
    for group in groups {
        let badge = format!("{} popular", group.items.len());
        let mut artist_col = column![group_header(group.artist, badge)].spacing(8);

        for s in group.items {
            let url = links::track_url(&s.artist, &s.track);
            artist_col = artist_col.push(link_row(
                s.track,
                s.year.map(|y| y.to_string()),
                Some(plays(s.playcount)),
                url,
            ));
        }
        col = col.push(card(artist_col));
    }

    col.into()
}

fn plays(n: u64) -> String {
    format!("{} plays", group_thousands(n))
}
