//! Filter controls: search box with tag suggestions, the A–Z strip,
//! selected tag chips and the result summary line.

use std::collections::BTreeSet;

use iced::widget::{button, column, container, scrollable, text, text_input, Column, Row};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;

use super::card::tag_chip;
use crate::state::filter::{FilterSummary, Suggestions};
use crate::state::index::{Initial, TagIndex};
use crate::Message;

const SUGGESTION_LIST_HEIGHT: f32 = 200.0;
const SUGGESTION_ROW_HEIGHT: f32 = 34.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

fn suggestion_row<'a>(tag: &str) -> Element<'a, Message> {
    button(text(tag.to_string()).size(14))
        .width(Length::Fill)
        .style(button::text)
        .on_press(Message::SuggestionPicked(tag.to_string()))
        .into()
}

pub fn search_bar<'a>(query: &str, suggestions: Suggestions<'a>) -> Element<'a, Message> {
    let input = text_input("Search projects or technologies...", query)
        .on_input(Message::SearchChanged)
        .padding(10)
        .size(16);

    let mut content = column![input].spacing(6);

    match suggestions {
        Suggestions::Idle => {}
        Suggestions::Matches(tags) if tags.is_empty() => {
            content = content.push(text("No suggestions").size(13));
        }
        Suggestions::Matches(tags) => {
            let height = (tags.len() as f32 * SUGGESTION_ROW_HEIGHT).min(SUGGESTION_LIST_HEIGHT);
            let list = Column::with_children(tags.into_iter().map(suggestion_row));
            content = content.push(
                container(scrollable(list).height(Length::Fixed(height)))
                    .padding(4)
                    .style(container::bordered_box),
            );
        }
    }

    container(content).max_width(640.0).into()
}

fn letter_button<'a>(initial: Initial, active: bool, enabled: bool) -> Element<'a, Message> {
    let style: ButtonStyle = if active {
        button::primary
    } else {
        button::secondary
    };

    button(text(initial.to_string()).size(14))
        .padding([4, 8])
        .style(style)
        .on_press_maybe(enabled.then_some(Message::InitialPressed(initial)))
        .into()
}

/// A–Z buttons. Letters without tags are disabled; pressing the active
/// letter again clears it.
pub fn letter_strip<'a>(index: &TagIndex, active: Option<Initial>) -> Element<'a, Message> {
    let letters = Row::with_children(
        Initial::all().map(|initial| letter_button(initial, active == Some(initial), index.has_tags(initial))),
    )
    .spacing(4);

    let mut content = column![text("Filter by technology").size(18), letters].spacing(8);

    if active.is_some() {
        content = content.push(
            button(text("Clear letter filter").size(13))
                .style(button::text)
                .on_press(Message::ClearInitial),
        );
    }

    content.into()
}

/// Tags under the active letter, for one-click selection
pub fn letter_tags<'a>(
    index: &'a TagIndex,
    active: Option<Initial>,
    selected: &BTreeSet<String>,
) -> Element<'a, Message> {
    let Some(initial) = active else {
        return column![].into();
    };

    Wrap::with_elements(
        index
            .tags_for(initial)
            .iter()
            .map(|t| tag_chip(t, selected.contains(t)))
            .collect(),
    )
    .spacing(6.0)
    .line_spacing(6.0)
    .into()
}

/// Chips for the required tags plus the "clear filters" action
pub fn selected_tags<'a>(selected: &BTreeSet<String>, any_filter: bool) -> Element<'a, Message> {
    let mut chips: Vec<Element<'a, Message>> = Vec::with_capacity(selected.len() + 1);
    for tag in selected {
        chips.push(
            button(text(format!("{tag}  ×")).size(12))
                .padding([2, 8])
                .style(button::primary)
                .on_press(Message::TagToggled(tag.clone()))
                .into(),
        );
    }

    if any_filter {
        chips.push(
            button(text("Clear filters").size(12))
                .padding([2, 8])
                .style(button::danger)
                .on_press(Message::ResetFilters)
                .into(),
        );
    }

    Wrap::with_elements(chips).spacing(6.0).line_spacing(6.0).into()
}

/// Text of the result line above the grid
pub fn summary_line(summary: FilterSummary, search_text: &str) -> String {
    let query = search_text.trim();
    if summary.filtered && !query.is_empty() {
        format!("{summary} matching \"{query}\"")
    } else if summary.filtered {
        summary.to_string()
    } else {
        format!("{summary}. Filter by technology or search to narrow down.")
    }
}

pub fn summary<'a>(summary: FilterSummary, search_text: &str) -> Element<'a, Message> {
    text(summary_line(summary, search_text)).size(14).into()
}

pub fn empty_state<'a>() -> Element<'a, Message> {
    let content = column![
        text("No projects match your filters").size(22),
        text("Try adjusting your search criteria or clearing some filters to see more projects.")
            .size(14),
        button(text("Clear filters")).on_press(Message::ResetFilters),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(content).center_x(Length::Fill).padding(40).into()
}

/// Search, letter and tag controls stacked above the grid
pub fn controls<'a>(
    index: &'a TagIndex,
    query: &str,
    suggestions: Suggestions<'a>,
    active: Option<Initial>,
    selected: &BTreeSet<String>,
    any_filter: bool,
) -> Element<'a, Message> {
    column![
        search_bar(query, suggestions),
        letter_strip(index, active),
        letter_tags(index, active, selected),
        selected_tags(selected, any_filter),
    ]
    .spacing(14)
    .into()
}
