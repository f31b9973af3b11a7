/// Filter controls: search box, one picker per dimension, reset, and
/// the row of removable chips for active filters.

use iced::widget::{button, pick_list, row, text, text_input, Row};
use iced::{Element, Length};
use std::fmt;

use crate::state::browser::Browser;
use crate::state::data::Dimension;
use crate::Message;

/// A picker entry. `value: None` is the "All ..." entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub dimension: Dimension,
    pub value: Option<String>,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => f.write_str(value),
            None => write!(f, "All {}", self.dimension.plural()),
        }
    }
}

/// Options for one dimension, "All ..." first
pub fn choices(browser: &Browser, dimension: Dimension) -> Vec<Choice> {
    std::iter::once(Choice {
        dimension,
        value: None,
    })
    .chain(browser.options(dimension).into_iter().map(|value| Choice {
        dimension,
        value: Some(value),
    }))
    .collect()
}

/// The currently selected entry for one dimension
pub fn selected(browser: &Browser, dimension: Dimension) -> Choice {
    let current = browser.predicates().value(dimension).trim();
    Choice {
        dimension,
        value: (!current.is_empty()).then(|| current.to_string()),
    }
}

pub fn controls(browser: &Browser) -> Element<'_, Message> {
    let search = text_input("Search by title, code, topic...", browser.search_input())
        .on_input(Message::SearchChanged)
        .padding(8)
        .width(Length::Fixed(280.0));

    let pickers = Dimension::ALL.iter().map(|&dimension| {
        pick_list(
            choices(browser, dimension),
            Some(selected(browser, dimension)),
            |choice: Choice| {
                Message::FilterSelected(choice.dimension, choice.value.unwrap_or_default())
            },
        )
        .padding(8)
        .into()
    });

    Row::new()
        .push(search)
        .extend(pickers)
        .push(button(text("Reset")).on_press(Message::ResetFilters).padding(8))
        .spacing(10)
        .into()
}

/// One chip per active categorical filter; clicking it removes the filter
pub fn chips(browser: &Browser) -> Element<'_, Message> {
    let chips = browser
        .predicates()
        .active_filters()
        .into_iter()
        .map(|(dimension, value)| {
            button(row![text(value.to_string()), text("✕")].spacing(6))
                .on_press(Message::RemoveFilter(dimension))
                .style(button::secondary)
                .padding([4, 10])
                .into()
        });

    Row::with_children(chips).spacing(8).into()
}
