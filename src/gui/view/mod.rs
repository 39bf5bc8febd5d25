//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod header;
mod missing;
mod overview;
mod popular;
mod recommendations;
mod screens;
mod settings;
mod title_bar;
mod widgets;

use iced::widget::{
    Row, Space, button, center, column, container, mouse_area, opaque, scrollable, stack, text,
};
use iced::{Color, Element, Length, Theme};

use super::state::{Message, MusicScanPro, Tab};
use super::util::tab_label;
use constants::PAGE_PAD;

pub(crate) fn theme(_state: &MusicScanPro) -> Theme {
    Theme::Dark
}

pub(crate) fn view(state: &MusicScanPro) -> Element<'_, Message> {
    let body: Element<'_, Message> = if let Some(busy) = state.busy {
        screens::build_loading(state, busy)
    } else if !state.has_scanned {
        screens::build_welcome(state)
    } else {
        build_dashboard(state)
    };

    let base: Element<'_, Message> = column![
        title_bar::build_title_bar(),
        container(body)
            .padding(PAGE_PAD)
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .into();

    if state.settings_open {
        with_modal(base, settings::build_settings_modal(state), Message::CloseSettings)
    } else {
        base
    }
}

fn build_dashboard(state: &MusicScanPro) -> Element<'_, Message> {
    let tabs = Row::with_children(Tab::ALL.iter().map(|&tab| {
        let style = if state.tab == tab {
            button::primary
        } else {
            button::text
        };
        button(text(tab_label(tab, state.comparison.as_ref())))
            .on_press(Message::SelectTab(tab))
            .style(style)
            .into()
    }))
    .spacing(4);

    column![
        header::build_header(state),
        tabs,
        scrollable(container(build_tab(state)).padding([0, 12]))
            .height(Length::Fill)
            .width(Length::Fill),
    ]
    .spacing(16)
    .into()
}

fn build_tab(state: &MusicScanPro) -> Element<'_, Message> {
    match (state.tab, &state.comparison) {
        (Tab::Overview, _) => overview::build_overview(state),
        (tab, None) => widgets::no_analysis(state, no_analysis_target(tab)),
        (Tab::Missing, Some(c)) => missing::build_missing(c),
        (Tab::Albums, Some(c)) => popular::build_albums(&c.new_albums),
        (Tab::Songs, Some(c)) => popular::build_songs(&c.new_songs),
        (Tab::Recommendations, Some(c)) => match &c.recommendations {
            Some(recs) => recommendations::build_recommendations(recs, &state.artist_images),
            None => widgets::no_analysis(state, no_analysis_target(Tab::Recommendations)),
        },
    }
}

fn no_analysis_target(tab: Tab) -> &'static str {
    match tab {
        Tab::Overview | Tab::Missing => "missing tracks from your collection",
        Tab::Albums => "new albums from your artists",
        Tab::Songs => "new singles and popular tracks",
        Tab::Recommendations => "artists similar to your collection",
    }
}

/// Dim the page, swallow clicks outside the dialog, and center `modal` on top.
fn with_modal<'a>(
    base: Element<'a, Message>,
    modal: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    let backdrop = mouse_area(
        container(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
                ..Default::default()
            }),
    )
    .on_press(on_blur);

    stack![base, opaque(backdrop), center(opaque(modal))].into()
}
