//! Settings modal (Last.fm credentials).

use iced::widget::{Space, button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::super::state::{Message, MusicScanPro};
use super::constants::{MODAL_W, ROW_TEXT, SECTION_TEXT, SMALL_TEXT};
use crate::core::links::LASTFM_API_ACCOUNT_URL;

pub(crate) fn build_settings_modal(state: &MusicScanPro) -> Element<'_, Message> {
    let draft = &state.settings_draft;

    let title = row![
        text("Settings").size(SECTION_TEXT),
        Space::new().width(Length::Fill),
        button(text("X").size(ROW_TEXT))
            .on_press(Message::CloseSettings)
            .style(button::text),
    ]
    .align_y(Alignment::Center);

    let fields = column![
        text("Last.fm API Configuration").size(ROW_TEXT),
        text("API Key").size(SMALL_TEXT),
        text_input("Enter your Last.fm API key", &draft.api_key)
            .on_input(Message::ApiKeyChanged)
            .on_submit(Message::SaveSettings),
        text("Shared Secret (Optional)").size(SMALL_TEXT),
        text_input("Enter your Last.fm shared secret", &draft.secret)
            .on_input(Message::SecretChanged)
            .on_submit(Message::SaveSettings)
            .secure(true),
    ]
    .spacing(6);

    let help = container(
        column![
            text("Need API credentials?").size(ROW_TEXT),
            text("1. Visit the Last.fm API page").size(SMALL_TEXT),
            text("2. Create a new application").size(SMALL_TEXT),
            text("3. Copy your API key and secret").size(SMALL_TEXT),
            text("4. Paste them above").size(SMALL_TEXT),
            button(text("Get API credentials").size(SMALL_TEXT))
                .on_press(Message::OpenExternal(LASTFM_API_ACCOUNT_URL.to_string()))
                .style(button::text),
        ]
        .spacing(4),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::bordered_box);

    let saved: Element<'_, Message> = if state.settings_saved {
        text("Settings saved!").size(SMALL_TEXT).style(text::success).into()
    } else {
        Space::new().into()
    };

    let save = button(if state.settings_saving { "Saving..." } else { "Save" })
        .on_press_maybe((!state.settings_saving).then_some(Message::SaveSettings))
        .style(button::primary);

    let footer = row![
        saved,
        Space::new().width(Length::Fill),
        button("Cancel")
            .on_press(Message::CloseSettings)
            .style(button::secondary),
        save,
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(column![title, fields, help, footer].spacing(16))
        .padding(20)
        .width(Length::Fixed(MODAL_W))
        .style(container::rounded_box)
        .into()
}
