//! Page sections and the navigation header

use iced::widget::{button, column, container, horizontal_space, row, text, Column, Row};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;

use crate::config::ThemeMode;
use crate::state::catalog::Catalog;
use crate::state::data::Certification;
use crate::Message;

const OWNER_NAME: &str = "Arshnoor Singh Sohi";
const OWNER_TAGLINE: &str = "Software developer · AI & distributed systems";
const ABOUT: [&str; 2] = [
    "Master's student in Applied Computing with AI Specialization at the University of Windsor. \
     Passionate about building innovative solutions that merge cutting-edge technology with \
     exceptional user experiences.",
    "With expertise in full-stack development, machine learning, and distributed systems, \
     I create software that pushes boundaries and solves real-world problems.",
];

/// Outbound contact links as (label, url)
pub const CONTACT_LINKS: [(&str, &str); 4] = [
    ("Email", "mailto:sohi21@uwindsor.ca"),
    ("GitHub", "https://github.com/Arshnoor-Singh-Sohi"),
    ("LinkedIn", "https://www.linkedin.com/in/arshnoorsinghsohi/"),
    ("Medium", "https://arshnoorsinghsohi.medium.com/"),
];

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Top-level pages reachable from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Projects,
    Certifications,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Projects,
        Section::Certifications,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Contact => "Contact",
        }
    }
}

fn nav_button<'a>(section: Section, current: Section) -> Element<'a, Message> {
    let style: ButtonStyle = if section == current {
        button::primary
    } else {
        button::text
    };

    button(text(section.label()).size(15))
        .style(style)
        .on_press(Message::NavigateTo(section))
        .into()
}

pub fn header<'a>(current: Section, theme: ThemeMode, music_enabled: bool) -> Element<'a, Message> {
    let nav = Row::with_children(Section::ALL.into_iter().map(|s| nav_button(s, current))).spacing(4);

    let theme_label = match theme {
        ThemeMode::Dark => "Light mode",
        ThemeMode::Light => "Dark mode",
    };
    let music_label = if music_enabled { "Mute music" } else { "Play music" };

    row![
        text(OWNER_NAME).size(22),
        horizontal_space(),
        nav,
        button(text(theme_label).size(13))
            .style(button::secondary)
            .on_press(Message::ToggleTheme),
        button(text(music_label).size(13))
            .style(button::secondary)
            .on_press(Message::ToggleMusic),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

pub fn home<'a>(catalog: &Catalog, tag_count: usize) -> Element<'a, Message> {
    let about = Column::with_children(ABOUT.iter().map(|p| text(*p).size(16).into())).spacing(10);

    let stats = row![
        stat(catalog.len(), "projects"),
        stat(tag_count, "technologies"),
        stat(catalog.featured().count(), "featured"),
    ]
    .spacing(32);

    column![
        text(OWNER_NAME).size(48),
        text(OWNER_TAGLINE).size(20),
        about,
        stats,
        row![
            button(text("View projects"))
                .style(button::primary)
                .on_press(Message::NavigateTo(Section::Projects)),
            button(text("Get in touch"))
                .style(button::secondary)
                .on_press(Message::NavigateTo(Section::Contact)),
        ]
        .spacing(12),
    ]
    .spacing(24)
    .max_width(820.0)
    .into()
}

fn stat<'a>(value: usize, label: &'a str) -> Element<'a, Message> {
    column![text(value.to_string()).size(36), text(label).size(14)]
        .align_x(Alignment::Center)
        .into()
}

/// Compact strip of featured projects above the filters
pub fn featured_strip(catalog: &Catalog) -> Element<'_, Message> {
    let mut featured = catalog.featured().peekable();
    if featured.peek().is_none() {
        return column![].into();
    }

    let items: Vec<Element<'_, Message>> = featured
        .map(|p| {
            container(
                column![
                    text(&p.name).size(16),
                    button(text("View code").size(12))
                        .style(button::text)
                        .on_press(Message::OpenLink(p.repo_url.clone())),
                ]
                .spacing(4),
            )
            .padding(12)
            .width(Length::Fixed(220.0))
            .style(container::rounded_box)
            .into()
        })
        .collect();

    column![
        text("Featured").size(18),
        Wrap::with_elements(items).spacing(10.0).line_spacing(10.0),
    ]
    .spacing(8)
    .into()
}

pub fn certifications(certs: &[Certification]) -> Element<'_, Message> {
    let cards: Vec<Element<'_, Message>> = certs
        .iter()
        .map(|cert| {
            container(
                column![
                    text(&cert.name).size(18),
                    text(&cert.issuer).size(14),
                    text(&cert.date).size(13),
                    button(text("View Certificate").size(13))
                        .style(button::secondary)
                        .on_press(Message::OpenLink(cert.url.clone())),
                ]
                .spacing(6),
            )
            .padding(16)
            .width(Length::Fixed(280.0))
            .style(container::rounded_box)
            .into()
        })
        .collect();

    column![
        text("Certifications & Achievements").size(32),
        Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0),
    ]
    .spacing(20)
    .into()
}

pub fn contact<'a>() -> Element<'a, Message> {
    let links = Column::with_children(CONTACT_LINKS.iter().map(|(label, url)| {
        row![
            text(*label).size(16).width(Length::Fixed(100.0)),
            button(text(url.trim_start_matches("mailto:")).size(14))
                .style(button::text)
                .on_press(Message::OpenLink(url.to_string())),
        ]
        .align_y(Alignment::Center)
        .into()
    }))
    .spacing(8);

    column![
        text("Let's work together").size(32),
        text("Open to collaborations, internships and full-time roles.").size(16),
        links,
    ]
    .spacing(16)
    .into()
}
