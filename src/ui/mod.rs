//! User interface module
//!
//! Pure view functions that turn state into iced elements:
//! - `card.rs` - project cards and the wrapping card grid
//! - `filters.rs` - search box, suggestions, A–Z strip, tag chips
//! - `sections.rs` - header navigation and the page sections

pub mod card;
pub mod filters;
pub mod sections;

use crate::config::ThemeMode;
use crate::state::index::Initial;
use sections::Section;

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(Section),
    SearchChanged(String),
    SuggestionPicked(String),
    TagToggled(String),
    /// A letter of the A–Z strip was pressed
    InitialPressed(Initial),
    ClearInitial,
    ResetFilters,
    ToggleTheme,
    /// Periodic check of the OS color scheme
    CheckSystemTheme,
    SystemThemeDetected(Option<ThemeMode>),
    ToggleMusic,
    /// Background preference write finished
    MusicPreferenceSaved(Result<(), String>),
    OpenLink(String),
}
