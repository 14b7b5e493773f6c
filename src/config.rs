//! Runtime configuration
//!
//! Resolved once at startup from the environment, falling back to the
//! platform data directory:
//! - Linux: ~/.local/share/portfolio-showcase/
//! - macOS: ~/Library/Application Support/portfolio-showcase/
//! - Windows: %APPDATA%\portfolio-showcase\

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "portfolio-showcase";
const PREFERENCES_FILE: &str = "preferences.db";

pub const DATA_DIR_ENV: &str = "SHOWCASE_DATA_DIR";
pub const ASSET_DIR_ENV: &str = "SHOWCASE_ASSET_DIR";
pub const THEME_ENV: &str = "SHOWCASE_THEME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a data directory; set SHOWCASE_DATA_DIR")]
    NoDataDir,

    #[error("SHOWCASE_THEME must be `dark` or `light`, got {0:?}")]
    InvalidTheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            _ => Err(ConfigError::InvalidTheme(value.to_string())),
        }
    }

    /// Map the OS color scheme. A host without a preference reads as light.
    pub fn from_system(mode: dark_light::Mode) -> Self {
        match mode {
            dark_light::Mode::Dark => ThemeMode::Dark,
            dark_light::Mode::Light | dark_light::Mode::Unspecified => ThemeMode::Light,
        }
    }
}

/// Current OS color scheme, `None` when the platform can't be queried
pub fn system_theme() -> Option<ThemeMode> {
    match dark_light::detect() {
        Ok(mode) => Some(ThemeMode::from_system(mode)),
        Err(err) => {
            tracing::debug!(?err, "color scheme detection failed");
            None
        }
    }
}

/// [`system_theme`] off the UI thread; some platforms answer over D-Bus.
pub async fn detect_system_theme() -> Option<ThemeMode> {
    tokio::task::spawn_blocking(system_theme)
        .await
        .unwrap_or_else(|err| {
            tracing::debug!(%err, "color scheme detection task failed");
            None
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the preference database
    pub data_dir: PathBuf,
    /// Root that local card images are resolved against
    pub asset_dir: PathBuf,
    /// Theme pinned by SHOWCASE_THEME; the OS color scheme is ignored when set
    pub theme_override: Option<ThemeMode>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let mut path = dirs::data_dir()
                    .or_else(dirs::home_dir)
                    .ok_or(ConfigError::NoDataDir)?;
                path.push(APP_DIR);
                path
            }
        };

        let asset_dir = lookup(ASSET_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let theme_override = match lookup(THEME_ENV) {
            Some(value) if !value.trim().is_empty() => Some(ThemeMode::parse(&value)?),
            _ => None,
        };

        Ok(AppConfig {
            data_dir,
            asset_dir,
            theme_override,
        })
    }

    /// Theme at startup: the override, then the OS scheme, then dark
    pub fn initial_theme(&self, system: Option<ThemeMode>) -> ThemeMode {
        self.theme_override.or(system).unwrap_or(ThemeMode::Dark)
    }

    /// Whether the theme should track OS color-scheme changes
    pub fn follows_system_theme(&self) -> bool {
        self.theme_override.is_none()
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_explicit_directories() {
        let cfg = config(&[(DATA_DIR_ENV, "/tmp/showcase"), (ASSET_DIR_ENV, "/srv/site")]).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/showcase"));
        assert_eq!(cfg.asset_dir, PathBuf::from("/srv/site"));
        assert_eq!(cfg.preferences_path(), PathBuf::from("/tmp/showcase/preferences.db"));
    }

    #[test]
    fn test_asset_dir_defaults_to_working_dir() {
        let cfg = config(&[(DATA_DIR_ENV, "/tmp/showcase")]).unwrap();
        assert_eq!(cfg.asset_dir, PathBuf::from("."));
    }

    #[test]
    fn test_theme_override_is_case_insensitive() {
        let cfg = config(&[(DATA_DIR_ENV, "/tmp/x"), (THEME_ENV, "LIGHT")]).unwrap();
        assert_eq!(cfg.theme_override, Some(ThemeMode::Light));
        assert!(!cfg.follows_system_theme());
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let err = config(&[(DATA_DIR_ENV, "/tmp/x"), (THEME_ENV, "sepia")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTheme(ref v) if v == "sepia"));
    }

    #[test]
    fn test_override_wins_over_system_scheme() {
        let pinned = config(&[(DATA_DIR_ENV, "/tmp/x"), (THEME_ENV, "dark")]).unwrap();
        assert_eq!(pinned.initial_theme(Some(ThemeMode::Light)), ThemeMode::Dark);

        let unset = config(&[(DATA_DIR_ENV, "/tmp/x")]).unwrap();
        assert!(unset.follows_system_theme());
        assert_eq!(unset.initial_theme(Some(ThemeMode::Light)), ThemeMode::Light);
        assert_eq!(unset.initial_theme(None), ThemeMode::Dark);
    }

    #[test]
    fn test_blank_override_follows_system() {
        let cfg = config(&[(DATA_DIR_ENV, "/tmp/x"), (THEME_ENV, "  ")]).unwrap();
        assert_eq!(cfg.theme_override, None);
    }

    #[test]
    fn test_system_scheme_mapping() {
        assert_eq!(ThemeMode::from_system(dark_light::Mode::Dark), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_system(dark_light::Mode::Light), ThemeMode::Light);
        assert_eq!(ThemeMode::from_system(dark_light::Mode::Unspecified), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_flips_mode() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
