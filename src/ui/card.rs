//! Project cards and the card grid

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use iced::widget::image::{Handle, Image};
use iced::widget::{button, column, container, row, text, Row};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::state::data::ProjectRecord;
use crate::Message;

/// Width of a card in the grid
const CARD_WIDTH: f32 = 340.0;
/// Height of the preview area on top of a card
const PREVIEW_HEIGHT: f32 = 170.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Local preview files that exist on disk, keyed by project id.
/// Remote images and missing files get a text placeholder instead.
pub fn resolve_previews<'a>(
    projects: impl IntoIterator<Item = &'a ProjectRecord>,
    asset_dir: &Path,
) -> HashMap<u32, PathBuf> {
    projects
        .into_iter()
        .filter_map(|p| {
            let path = p.image_source().resolve(asset_dir)?;
            if path.is_file() {
                Some((p.id, path))
            } else {
                tracing::debug!(project = p.id, path = %path.display(), "preview image not found");
                None
            }
        })
        .collect()
}

/// Clickable tag chip; highlighted when the tag is a selected filter
pub fn tag_chip<'a>(tag: &str, selected: bool) -> Element<'a, Message> {
    let style: ButtonStyle = if selected {
        button::primary
    } else {
        button::secondary
    };

    button(text(tag.to_string()).size(12))
        .padding([2, 8])
        .style(style)
        .on_press(Message::TagToggled(tag.to_string()))
        .into()
}

fn preview<'a>(project: &'a ProjectRecord, path: Option<&PathBuf>) -> Element<'a, Message> {
    match path {
        Some(path) => Image::new(Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fixed(PREVIEW_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(&project.name).size(22))
            .width(Length::Fill)
            .height(Length::Fixed(PREVIEW_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(PREVIEW_HEIGHT))
            .style(container::bordered_box)
            .into(),
    }
}

pub fn project_card<'a>(
    project: &'a ProjectRecord,
    selected: &BTreeSet<String>,
    previews: &HashMap<u32, PathBuf>,
) -> Element<'a, Message> {
    let tags = Wrap::with_elements(
        project
            .techs
            .iter()
            .map(|t| tag_chip(t, selected.contains(t)))
            .collect(),
    )
    .spacing(6.0)
    .line_spacing(6.0);

    let mut links: Row<'a, Message> = row![button(text("Code").size(14))
        .style(button::secondary)
        .on_press(Message::OpenLink(project.repo_url.clone()))]
    .spacing(8)
    .align_y(Alignment::Center);

    if let Some(url) = project.demo_url() {
        links = links.push(
            button(text("Live Demo").size(14))
                .style(button::primary)
                .on_press(Message::OpenLink(url.to_string())),
        );
    }

    let body = column![
        preview(project, previews.get(&project.id)),
        text(&project.name).size(20),
        text(&project.description).size(14),
        tags,
        links,
    ]
    .spacing(10);

    container(body)
        .padding(16)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::rounded_box)
        .into()
}

/// Cards laid out left to right, wrapping to the window width
pub fn grid<'a>(
    projects: impl Iterator<Item = &'a ProjectRecord>,
    selected: &BTreeSet<String>,
    previews: &HashMap<u32, PathBuf>,
) -> Element<'a, Message> {
    Wrap::with_elements(
        projects
            .map(|p| project_card(p, selected, previews))
            .collect(),
    )
    .spacing(16.0)
    .line_spacing(16.0)
    .into()
}
