//! YAML configuration for menucalc.
//!
//! Every section is optional; a missing file means all defaults.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "local datasets"
//!
//! source:
//!   kind: "http"
//!   base_url: "https://example.com/nutrition"
//!   timeout_secs: 15
//!
//! logging:
//!   level: "debug"
//!   json: false
//!
//! theme:
//!   path: ".menucalc/prefs.json"
//!
//! # Replaces the bundled dataset registry.
//! datasets:
//!   kfc:
//!     - region: "uk"
//!       path: "data/kfc_uk.json"
//!     - region: "international"
//!       path: "data/kfc_international.json"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use normalize::Brand;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LoadError;
use crate::registry::{DatasetRegistry, RegionDataset};
use crate::source::{DatasetSource, DirSource, HttpSource};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub source: SourceYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,

    #[serde(default)]
    pub theme: ThemeYamlConfig,

    /// Overrides the bundled registry when non-empty.
    #[serde(default)]
    pub datasets: BTreeMap<Brand, Vec<RegionDataset>>,
}

impl AppConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.source.validate()?;

        for (brand, datasets) in &self.datasets {
            if datasets.is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "datasets.{brand} must list at least one region"
                )));
            }
            if let Some(bad) = datasets
                .iter()
                .find(|d| d.region.trim().is_empty() || d.path.trim().is_empty())
            {
                return Err(ConfigLoadError::Validation(format!(
                    "datasets.{brand} has an entry with an empty region or path: {bad:?}"
                )));
            }
        }

        Ok(())
    }

    /// The dataset registry this configuration describes.
    pub fn registry(&self) -> DatasetRegistry {
        if self.datasets.is_empty() {
            DatasetRegistry::default()
        } else {
            DatasetRegistry::new(self.datasets.clone())
        }
    }

    /// Build the dataset source the `source` section selects.
    pub fn build_source(&self) -> Result<Box<dyn DatasetSource>, LoadError> {
        match (self.source.kind, self.source.base_url.as_deref()) {
            (SourceKind::Http, Some(base_url)) => Ok(Box::new(HttpSource::new(
                base_url,
                self.source.timeout(),
            )?)),
            _ => Ok(Box::new(DirSource::new(self.source.data_dir.clone()))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            source: SourceYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
            theme: ThemeYamlConfig::default(),
            datasets: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Dir,
    Http,
}

/// Where dataset documents are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceYamlConfig {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SourceYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "source.timeout_secs must be >= 1".to_string(),
            ));
        }
        if self.kind == SourceKind::Http
            && self.base_url.as_deref().is_none_or(|u| u.trim().is_empty())
        {
            return Err(ConfigLoadError::Validation(
                "source.base_url is required when kind is 'http'".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceYamlConfig {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            data_dir: default_data_dir(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeYamlConfig {
    #[serde(default = "default_theme_path")]
    pub path: PathBuf,
}

impl Default for ThemeYamlConfig {
    fn default() -> Self {
        Self {
            path: default_theme_path(),
        }
    }
}

fn default_source_kind() -> SourceKind {
    SourceKind::Dir
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_theme_path() -> PathBuf {
    PathBuf::from(".menucalc/prefs.json")
}
