use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{OrganizerError, Result};
use crate::models::ReferenceData;
use crate::positioner::PlacementConfig;

/// Environment variable naming an alternative data file
pub const DATA_ENV_VAR: &str = "LIFECYCLE_DATA";

const DEFAULT_FONT_SIZE: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

/// User settings persisted as YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default = "default_font_size")]
    pub base_font_size: f32,
    /// Overlay placement constants
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Alternative reference data (YAML or JSON)
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::default(),
            base_font_size: DEFAULT_FONT_SIZE,
            placement: PlacementConfig::default(),
            data_file: None,
        }
    }
}

impl Settings {
    /// `<config dir>/lifecycle-organizer/settings.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifecycle-organizer")
            .join("settings.yaml")
    }

    /// Loads settings from the default location, or defaults if missing or invalid
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| OrganizerError::io(path, e))?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OrganizerError::io(parent, e))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(|e| OrganizerError::io(path, e))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path())
    }

    /// Data file to use: explicit argument, then `LIFECYCLE_DATA`, then settings
    pub fn resolve_data_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var(DATA_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        self.data_file.clone()
    }

    /// Reference data from the resolved file, or the built-in set
    pub fn load_data(&self, explicit: Option<&Path>) -> Result<ReferenceData> {
        match self.resolve_data_path(explicit) {
            Some(path) => ReferenceData::load(path),
            None => Ok(ReferenceData::builtin()),
        }
    }
}
