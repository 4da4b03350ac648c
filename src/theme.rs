//! Theme preference: the one piece of state that outlives a session.
//!
//! Stored as a `theme` key in a small JSON object file. The store never
//! surfaces an error: an unreadable or missing file means [`Theme::Light`],
//! and a failed write is logged and dropped.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

const THEME_KEY: &str = "theme";

/// Error returned when a string names neither theme.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown theme {0:?}, expected light or dark")]
pub struct ThemeParseError(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ThemeParseError(s.to_string())),
        }
    }
}

/// File-backed key-value store holding the theme preference.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme; anything other than `"dark"` reads as light.
    pub fn load(&self) -> Theme {
        match self.read_entries() {
            Ok(entries) => match entries.get(THEME_KEY).and_then(Value::as_str) {
                Some("dark") => Theme::Dark,
                _ => Theme::Light,
            },
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "theme_store_unreadable");
                Theme::Light
            }
        }
    }

    /// Persist `theme`, keeping any other keys in the file.
    pub fn save(&self, theme: Theme) {
        if let Err(err) = self.write_theme(theme) {
            debug!(path = %self.path.display(), error = %err, "theme_store_write_failed");
        }
    }

    /// Flip the stored theme and return the new value.
    pub fn toggle(&self) -> Theme {
        let next = self.load().toggle();
        self.save(next);
        next
    }

    fn read_entries(&self) -> io::Result<Map<String, Value>> {
        let text = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(entries) => Ok(entries),
            _ => Ok(Map::new()),
        }
    }

    fn write_theme(&self, theme: Theme) -> io::Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(THEME_KEY.to_string(), Value::String(theme.as_str().into()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&Value::Object(entries))?;
        fs::write(&self.path, text)
    }
}
