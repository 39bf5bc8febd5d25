//! Artist Recommendations tab.

use std::collections::HashMap;

use iced::widget::{Column, Row, button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use super::super::state::Message;
use super::super::util::similarity_percent;
use super::constants::{GROUP_SPACING, REC_CARD_W, SECTION_TEXT, SMALL_TEXT};
use super::widgets::{artist_thumb, empty_message};
use crate::core::links;
use crate::core::stats::group_thousands;
use crate::core::types::Recommendation;

const PER_ROW: usize = 2;

pub(crate) fn build_recommendations<'a>(
    recs: &'a [Recommendation],
    images: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    if recs.is_empty() {
        return empty_message("No artist recommendations found. Your taste is too unique!");
    }

    let mut col = Column::new().spacing(GROUP_SPACING);
    for chunk in recs.chunks(PER_ROW) {
        let cards = chunk.iter().map(|r| rec_card(r, images.get(&r.artist)));
        col = col.push(Row::with_children(cards).spacing(GROUP_SPACING));
    }
    col.into()
}

fn rec_card<'a>(r: &'a Recommendation, thumb: Option<&image::Handle>) -> Element<'a, Message> {
    let head = row![
        artist_thumb(thumb, &r.artist),
        column![
            text(&r.artist).size(SECTION_TEXT),
            text(format!("{} similarity", similarity_percent(r.similarity))).size(SMALL_TEXT),
        ]
        .spacing(4),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let numbers = column![
        row![
            text("Listeners:").size(SMALL_TEXT).width(Length::Fill),
            text(group_thousands(r.listeners)).size(SMALL_TEXT),
        ],
        row![
            text("Plays:").size(SMALL_TEXT).width(Length::Fill),
            text(group_thousands(r.playcount)).size(SMALL_TEXT),
        ],
    ]
    .spacing(2);

    let mut body = column![head, numbers].spacing(10);

    if !r.tags.is_empty() {
        // First three only.
        let tags = r.tags.iter().take(3).map(|tag| {
            container(text(tag).size(SMALL_TEXT))
                .padding([2, 8])
                .style(container::bordered_box)
                .into()
        });
        body = body.push(Row::with_children(tags).spacing(6));
    }

    button(body.width(Length::Fill))
        .on_press(Message::OpenExternal(links::artist_url(&r.artist)))
        .padding(16)
        .width(Length::Fixed(REC_CARD_W))
        .style(button::secondary)
        .into()
}
