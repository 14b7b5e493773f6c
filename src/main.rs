use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_showcase::config::{self, AppConfig, ThemeMode};
use portfolio_showcase::error::AppError;
use portfolio_showcase::state::catalog::{self, Catalog};
use portfolio_showcase::state::data::Certification;
use portfolio_showcase::state::filter::CatalogFilter;
use portfolio_showcase::state::preferences::{self, Preferences};
use portfolio_showcase::ui;
use portfolio_showcase::ui::sections::Section;
use portfolio_showcase::Message;

/// How often the OS color scheme is re-read while the theme follows it
const SYSTEM_THEME_POLL: Duration = Duration::from_secs(2);

/// Main application state.
/// Everything a session mutates lives here and is passed down to the views.
struct Showcase {
    /// Catalog, tag index and the session's filter state
    filter: CatalogFilter,
    certifications: Vec<Certification>,
    /// Preview images found on disk, by project id
    previews: HashMap<u32, PathBuf>,
    preferences: Preferences,
    section: Section,
    theme: ThemeMode,
    /// Cleared by SHOWCASE_THEME or the header toggle
    follow_system_theme: bool,
    music_enabled: bool,
    /// Revision of the last music write handed to the store
    music_revision: u64,
    /// Status message to display to the user
    status: Option<String>,
}

impl Showcase {
    fn new(
        config: &AppConfig,
        system_theme: Option<ThemeMode>,
        catalog: Catalog,
        certifications: Vec<Certification>,
        preferences: Preferences,
    ) -> Self {
        let mut status = None;
        let stored = preferences
            .music_enabled()
            .and_then(|enabled| Ok((enabled, preferences.music_revision()?)));
        let (music_enabled, music_revision) = stored.unwrap_or_else(|err| {
            warn!(%err, "could not read music preference, defaulting to off");
            status = Some(format!("Could not read music preference: {err}"));
            (false, 0)
        });
        let previews = ui::card::resolve_previews(catalog.projects(), &config.asset_dir);
        let filter = CatalogFilter::new(catalog);

        info!(
            projects = filter.catalog().len(),
            tags = filter.index().all_tags().len(),
            previews = previews.len(),
            music_enabled,
            "showcase initialized"
        );

        Showcase {
            filter,
            certifications,
            previews,
            preferences,
            section: Section::default(),
            theme: config.initial_theme(system_theme),
            follow_system_theme: config.follows_system_theme(),
            music_enabled,
            music_revision,
            status,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NavigateTo(section) => {
                self.section = section;
            }
            Message::SearchChanged(query) => {
                self.filter.set_search_text(query);
            }
            Message::SuggestionPicked(tag) => {
                self.filter.accept_suggestion(&tag);
            }
            Message::TagToggled(tag) => {
                self.filter.toggle_tag(&tag);
                // Tags are clickable on every page; the result lives here.
                self.section = Section::Projects;
            }
            Message::InitialPressed(initial) => {
                let next = if self.filter.state().active_initial == Some(initial) {
                    None
                } else {
                    Some(initial)
                };
                self.filter.set_active_initial(next);
            }
            Message::ClearInitial => {
                self.filter.set_active_initial(None);
            }
            Message::ResetFilters => {
                self.filter.reset();
            }
            Message::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.follow_system_theme = false;
            }
            Message::CheckSystemTheme => {
                if self.follow_system_theme {
                    return Task::perform(config::detect_system_theme(), Message::SystemThemeDetected);
                }
            }
            Message::SystemThemeDetected(Some(theme)) => {
                if self.follow_system_theme && theme != self.theme {
                    info!(?theme, "following system color scheme");
                    self.theme = theme;
                }
            }
            Message::SystemThemeDetected(None) => {}
            Message::ToggleMusic => {
                self.music_enabled = !self.music_enabled;
                return self.save_music_preference();
            }
            Message::MusicPreferenceSaved(Ok(())) => {
                self.status = None;
            }
            Message::MusicPreferenceSaved(Err(err)) => {
                warn!(%err, "music preference was not saved");
                self.status = Some(format!("Could not save music preference: {err}"));
            }
            Message::OpenLink(url) => {
                if let Err(err) = webbrowser::open(&url) {
                    warn!(%err, url = %url, "failed to open link");
                    self.status = Some(format!("Could not open {url}"));
                }
            }
        }

        Task::none()
    }

    /// Persist the current music flag. File-backed stores are written on a
    /// background thread; in-memory stores are written in place. Each toggle
    /// gets the next revision so a late, older write can't win.
    fn save_music_preference(&mut self) -> Task<Message> {
        let enabled = self.music_enabled;
        self.music_revision += 1;
        let revision = self.music_revision;

        match self.preferences.path() {
            Some(path) => Task::perform(
                preferences::persist_music_enabled(path.to_path_buf(), enabled, revision),
                |result| Message::MusicPreferenceSaved(result.map(|_| ()).map_err(|e| e.to_string())),
            ),
            None => {
                if let Err(err) = self.preferences.set_music_enabled(enabled, revision) {
                    warn!(%err, "music preference was not saved");
                    self.status = Some(format!("Could not save music preference: {err}"));
                }
                Task::none()
            }
        }
    }

    fn projects_view(&self) -> Element<'_, Message> {
        let state = self.filter.state();
        let summary = self.filter.summary();

        let grid = if self.filter.visible_count() == 0 {
            ui::filters::empty_state()
        } else {
            ui::card::grid(self.filter.visible(), &state.selected_tags, &self.previews)
        };

        column![
            ui::sections::featured_strip(self.filter.catalog()),
            ui::filters::controls(
                self.filter.index(),
                &state.search_text,
                self.filter.suggestions(),
                state.active_initial,
                &state.selected_tags,
                summary.filtered,
            ),
            ui::filters::summary(summary, &state.search_text),
            grid,
        ]
        .spacing(20)
        .into()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let body = match self.section {
            Section::Home => ui::sections::home(self.filter.catalog(), self.filter.index().all_tags().len()),
            Section::Projects => self.projects_view(),
            Section::Certifications => ui::sections::certifications(&self.certifications),
            Section::Contact => ui::sections::contact(),
        };

        let mut content = column![
            ui::sections::header(self.section, self.theme, self.music_enabled),
            scrollable(container(body).padding(24).width(Length::Fill)).height(Length::Fill),
        ]
        .spacing(12);

        if let Some(status) = &self.status {
            content = content.push(text(status).size(14));
        }

        container(content)
            .padding(16)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.theme {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.follow_system_theme {
            iced::time::every(SYSTEM_THEME_POLL).map(|_| Message::CheckSystemTheme)
        } else {
            Subscription::none()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Log a fatal startup error and show it in a native dialog
fn report_fatal(err: &AppError) {
    error!(%err, "startup failed");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Portfolio Showcase")
        .set_description(err.to_string())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn load() -> Result<(AppConfig, Catalog, Vec<Certification>, Preferences), AppError> {
    let config = AppConfig::from_env()?;
    let catalog = Catalog::embedded()?;
    let certifications = catalog::embedded_certifications()?;
    let preferences = Preferences::open(&config.preferences_path())?;
    Ok((config, catalog, certifications, preferences))
}

fn main() -> Result<(), AppError> {
    init_tracing();

    let (config, catalog, certifications, preferences) = load().map_err(|err| {
        report_fatal(&err);
        err
    })?;
    let system_theme = if config.follows_system_theme() {
        config::system_theme()
    } else {
        None
    };
    let showcase = Showcase::new(&config, system_theme, catalog, certifications, preferences);

    iced::application("Portfolio Showcase", Showcase::update, Showcase::view)
        .theme(Showcase::theme)
        .subscription(Showcase::subscription)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || (showcase, Task::none()))?;

    Ok(())
}
