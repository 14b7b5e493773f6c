use thiserror::Error;

use crate::config::ConfigError;
use crate::state::catalog::CatalogError;
use crate::state::preferences::PreferencesError;

/// Fatal startup and runtime errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog failed to load: {0}")]
    Catalog(#[from] CatalogError),

    #[error("preferences: {0}")]
    Preferences(#[from] PreferencesError),

    #[error("user interface: {0}")]
    Ui(#[from] iced::Error),
}
