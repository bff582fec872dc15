// Settings service
// Loads and stores config.toml and resolves where the events file lives

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::models::settings::Settings;

const CONFIG_FILE: &str = "config.toml";
const EVENTS_FILE: &str = "events.txt";

pub struct SettingsService {
    config_path: PathBuf,
}

impl SettingsService {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Service for `config.toml` in the platform config directory
    pub fn from_default_location() -> Self {
        let config_path = project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::new(config_path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read the settings; a missing file yields the defaults
    pub fn get(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read settings from {}", self.config_path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", self.config_path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    /// Write the settings back to disk
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.config_path, data)
            .with_context(|| format!("Failed to write settings to {}", self.config_path.display()))?;
        Ok(())
    }

    /// Where events are stored: the configured path, otherwise the default
    pub fn resolve_events_file(settings: &Settings) -> PathBuf {
        settings
            .events_file
            .clone()
            .unwrap_or_else(default_events_file)
    }
}

pub fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Settings::default()
        }
    }
}

#[cfg(debug_assertions)]
fn default_events_file() -> PathBuf {
    PathBuf::from("files").join(EVENTS_FILE)
}

#[cfg(not(debug_assertions))]
fn default_events_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(EVENTS_FILE))
        .unwrap_or_else(|| PathBuf::from(EVENTS_FILE))
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "SimpleCalendar", "SimpleCalendar")
}
