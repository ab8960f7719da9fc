use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Duration;
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/food_inventory.db";
pub const SETTINGS_FILE: &str = "food_inventory.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `None` lets each front end pick its own default location.
    pub database_url: Option<String>,
    pub capture_file: PathBuf,
    pub capture_max_age_minutes: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            capture_file: PathBuf::from("last_capture.json"),
            capture_max_age_minutes: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    database_url: Option<String>,
    capture_file: Option<PathBuf>,
    capture_max_age_minutes: Option<i64>,
}

/// Capture freshness window; `None` below one minute or beyond what `Duration` can hold.
pub fn capture_max_age(minutes: i64) -> Option<Duration> {
    if minutes < 1 {
        return None;
    }
    Duration::try_minutes(minutes)
}

impl Settings {
    pub fn database_url(&self) -> String {
        normalize_database_url(self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL))
    }

    pub fn database_url_or(&self, fallback: &Path) -> String {
        match &self.database_url {
            Some(url) => normalize_database_url(url),
            None => normalize_database_url(&fallback.to_string_lossy()),
        }
    }

    fn set_capture_max_age_minutes(&mut self, minutes: i64) {
        if capture_max_age(minutes).is_some() {
            self.capture_max_age_minutes = minutes;
        } else {
            tracing::warn!(minutes, "ignoring out-of-range capture max age");
        }
    }

    fn apply_file(&mut self, raw: &str) -> Result<(), toml::de::Error> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.database_url {
            self.database_url = Some(v);
        }
        if let Some(v) = file.capture_file {
            self.capture_file = v;
        }
        if let Some(v) = file.capture_max_age_minutes {
            self.set_capture_max_age_minutes(v);
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("DATABASE_URL") {
            self.database_url = Some(v);
        }
        if let Some(v) = lookup("FOOD_INVENTORY__DATABASE_URL") {
            self.database_url = Some(v);
        }
        if let Some(v) = lookup("FOOD_INVENTORY__CAPTURE_FILE") {
            self.capture_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("FOOD_INVENTORY__CAPTURE_MAX_AGE_MINUTES") {
            match v.parse::<i64>() {
                Ok(parsed) => self.set_capture_max_age_minutes(parsed),
                Err(err) => tracing::warn!(value = %v, "ignoring capture max age: {err}"),
            }
        }
    }
}

/// Defaults, then `food_inventory.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Err(err) = settings.apply_file(&raw) {
            tracing::warn!(path = %path.display(), "ignoring malformed settings file: {err}");
        }
    }

    settings.apply_env(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));
    settings
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return DEFAULT_DATABASE_URL.to_string();
    }

    if raw_database_url.starts_with("sqlite::memory:") {
        return raw_database_url.to_string();
    }

    let path = if let Some(rest) = raw_database_url.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = raw_database_url.strip_prefix("sqlite:") {
        rest
    } else if raw_database_url.contains("://") {
        return raw_database_url.to_string();
    } else {
        raw_database_url
    };

    let path = path.replace('\\', "/");
    if has_windows_drive_prefix(&path) {
        format!("sqlite:{path}")
    } else {
        format!("sqlite://{path}")
    }
}

fn has_windows_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
