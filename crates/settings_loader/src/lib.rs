//! # Settings Loader
//!
//! Loads the dashboard configuration (`settings.json`): where the statement
//! documents live, which year keys to chart, and where the server listens.
//!
//! Every field of [`Settings`] has a default, so the file is optional: a missing
//! default file yields the built-in configuration, while an explicitly requested
//! file that cannot be read or parsed is an error.
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! let settings = settings_loader::load_settings("config/settings.json")?;
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Reads one settings file. Fields absent from the file keep their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    tracing::debug!(
        "Settings: data_dir={} years={}/{}",
        settings.data_dir.display(),
        settings.reporting.prior_year,
        settings.reporting.current_year
    );
    Ok(settings)
}

/// Loads settings from the default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// Loads the given file if provided, otherwise the default file if it exists,
/// otherwise the built-in defaults.
///
/// An explicit path that fails to load is an error; only the implicit default
/// location is allowed to be absent.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings) = load_optional_settings(path)? {
        tracing::debug!("Loaded settings from {}", path.map(|p| p.display().to_string()).unwrap_or_default());
        return Ok(settings);
    }

    if default_settings_exist() {
        tracing::debug!("Loaded settings from {}", DEFAULT_SETTINGS_FILE);
        return load_default_settings();
    }

    tracing::info!("No {} found, using built-in defaults", DEFAULT_SETTINGS_FILE);
    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_settings_from_file() {
        let file = write_temp(r#"{"app_title": "Test Board", "server": {"port": 9000}}"#);

        let settings = load_settings(file.path()).unwrap();

        assert_eq!(settings.app_title, "Test Board");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_settings_reports_path_on_parse_error() {
        let file = write_temp("{ not json");

        let err = load_settings(file.path()).unwrap_err();

        assert!(format!("{:#}", err).contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_optional_settings_none() {
        assert!(load_optional_settings(None).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = PathBuf::from("definitely/not/here/settings.json");
        assert!(load_settings_with_fallback(Some(&path)).is_err());
    }

    #[test]
    fn test_settings_file_exists() {
        let file = write_temp("{}");
        assert!(settings_file_exists(file.path()));
        assert!(!settings_file_exists("definitely/not/here.json"));
    }
}
