//! Custom title bar (the window is undecorated).

use iced::widget::{Space, button, container, mouse_area, row, text};
use iced::{Alignment, Length};

use super::super::state::{Message, WindowAction};
use super::constants::{ROW_TEXT, TITLE_BAR_H};

pub(crate) fn build_title_bar() -> iced::widget::Container<'static, Message> {
    // Pressing anywhere on the title area drags the window.
    let drag_area = mouse_area(
        container(text("Music Scan Pro").size(ROW_TEXT))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .padding([0, 12]),
    )
    .on_press(Message::Window(WindowAction::Drag))
    .on_double_click(Message::Window(WindowAction::ToggleMaximize));

    let controls = row![
        button(text("_").size(ROW_TEXT))
            .on_press(Message::Window(WindowAction::Minimize))
            .style(button::text),
        button(text("[ ]").size(ROW_TEXT))
            .on_press(Message::Window(WindowAction::ToggleMaximize))
            .style(button::text),
        button(text("X").size(ROW_TEXT))
            .on_press(Message::Window(WindowAction::Close))
            .style(button::danger),
        Space::new().width(Length::Fixed(4.0)),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    container(row![drag_area, controls].align_y(Alignment::Center))
        .height(Length::Fixed(TITLE_BAR_H))
        .width(Length::Fill)
        .style(container::dark)
}
