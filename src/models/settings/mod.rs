// Settings module
// Application configuration read from config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do when the events file does not exist at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFilePolicy {
    /// Start with an empty calendar and log a warning
    #[default]
    Empty,
    /// Abort startup
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    pub enabled: bool,
    pub keep: usize,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            keep: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Location of the events file; resolved by the settings service when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
    pub missing_file: MissingFilePolicy,
    pub backup: BackupSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.backup.enabled && self.backup.keep == 0 {
            return Err("backup.keep must be at least 1 when backups are enabled".to_string());
        }

        if let Some(ref path) = self.events_file {
            if path.as_os_str().is_empty() {
                return Err("events_file cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.events_file.is_none());
        assert_eq!(settings.missing_file, MissingFilePolicy::Empty);
        assert!(settings.backup.enabled);
        assert_eq!(settings.backup.keep, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_keep() {
        let mut settings = Settings::default();
        settings.backup.keep = 0;
        assert!(settings.validate().is_err());

        settings.backup.enabled = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_path() {
        let settings = Settings {
            events_file: Some(PathBuf::new()),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
