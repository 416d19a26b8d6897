//! Application settings loaded from an optional TOML file and the environment.
//!
//! Lookup order for the database URL: `DATABASE_URL` environment variable, then
//! the `[database]` table of the config file, then the built-in default. The
//! config file path comes from `POS_CONFIG`, falling back to `./config.toml`;
//! a missing file is not an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://pos_system.db?mode=rwc";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level settings, mirroring the layout of config.toml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Storage settings
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// The `[database]` table of config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// `SeaORM` connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Whether `SQLx` logs each statement
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            sqlx_logging: false,
        }
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// Parses settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Resolves the effective settings for this process.
///
/// # Errors
/// Returns an error only if a config file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("POS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut settings = if Path::new(&path).exists() {
        info!("Loading settings from {}", path);
        load_settings(&path)?
    } else {
        debug!("No config file at {}, using defaults", path);
        Settings::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database.url = url;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [database]
            url = "sqlite://till.db?mode=rwc"
            sqlx_logging = true
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database.url, "sqlite://till.db?mode=rwc");
        assert!(settings.database.sqlx_logging);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
        assert!(!settings.database.sqlx_logging);
    }

    #[test]
    fn test_partial_database_table_fills_defaults() {
        let settings: Settings = toml::from_str("[database]\nsqlx_logging = true\n").unwrap();
        assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
        assert!(settings.database.sqlx_logging);
    }

    #[test]
    fn test_load_settings_missing_file_is_config_error() {
        let result = load_settings("definitely/not/here.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
