/// View layer
///
/// Widgets are built from `Browser` state only:
/// - card.rs: one card per visible material
/// - filters.rs: search box, pickers, reset button and chips

pub mod card;
pub mod filters;

use iced::widget::{button, column, container, scrollable, text};
use iced::{Alignment, Color, Element, Length};
use chrono::Local;
use iced_aw::Wrap;

use crate::state::browser::{Browser, Phase};
use crate::Message;

const ERROR_COLOR: Color = Color::from_rgb(0.9, 0.35, 0.35);

/// Short status line for the header
pub fn status_line(browser: &Browser) -> String {
    match browser.phase() {
        Phase::Loading => "Loading materials...".to_string(),
        Phase::Ready(catalog) => format!(
            "{} of {} materials (updated {})",
            browser.visibility().visible_count,
            browser.total_count(),
            catalog.fetched_at.with_timezone(&Local).format("%H:%M")
        ),
        Phase::Failed(_) => "Offline".to_string(),
    }
}

/// Main panel: loader, error with retry, empty state, or the card grid
pub fn body(browser: &Browser) -> Element<'_, Message> {
    match browser.phase() {
        Phase::Loading => centered(text("Loading materials...").size(18).into()),
        Phase::Failed(failure) => centered(
            column![
                text(format!("Error: {failure}")).size(18).color(ERROR_COLOR),
                button(text("Retry")).on_press(Message::Reload).padding(10),
            ]
            .spacing(16)
            .align_x(Alignment::Center)
            .into(),
        ),
        Phase::Ready(_) if browser.visibility().is_empty() => {
            let mut empty = column![text(empty_message(browser)).size(18)]
                .spacing(16)
                .align_x(Alignment::Center);
            if browser.has_active_filters() {
                empty = empty.push(
                    button(text("Reset filters"))
                        .on_press(Message::ResetFilters)
                        .padding(10),
                );
            }
            centered(empty.into())
        }
        Phase::Ready(_) => {
            let cards = browser
                .visible_materials()
                .into_iter()
                .map(card::material_card)
                .collect();

            scrollable(Wrap::with_elements(cards).spacing(12.0).line_spacing(12.0))
                .height(Length::Fill)
                .width(Length::Fill)
                .into()
        }
    }
}

/// Text for the "no results" state
pub fn empty_message(browser: &Browser) -> &'static str {
    if browser.total_count() == 0 {
        "No materials have been published yet."
    } else {
        "No materials match your filters."
    }
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
