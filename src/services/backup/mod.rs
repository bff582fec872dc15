use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::services::event::EventStore;

const BACKUP_MARKER: &str = "_backup_";

/// Information about a backup file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub filename: String,
    pub created_at: DateTime<Local>,
    pub size_bytes: u64,
}

impl BackupInfo {
    /// Parse backup info from a file path
    fn from_path(path: PathBuf) -> Result<Self> {
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to get metadata for {:?}", path))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let created_at = metadata
            .created()
            .or_else(|_| metadata.modified())
            .with_context(|| format!("Failed to get creation time for {:?}", path))?;

        Ok(BackupInfo {
            path,
            filename,
            created_at: DateTime::<Local>::from(created_at),
            size_bytes: metadata.len(),
        })
    }
}

/// Service for managing copies of the events file
pub struct BackupService;

impl BackupService {
    /// Create a timestamped copy of `events_path` inside `backup_dir`
    ///
    /// # Returns
    /// Path to the created backup file
    pub fn create_backup(events_path: &Path, backup_dir: &Path) -> Result<PathBuf> {
        if !events_path.exists() {
            anyhow::bail!("Events file does not exist: {:?}", events_path);
        }

        fs::create_dir_all(backup_dir)
            .with_context(|| format!("Failed to create backup directory: {:?}", backup_dir))?;

        let stem = events_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("events");
        let extension = events_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("txt");
        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S%3f");

        let mut backup_path =
            backup_dir.join(format!("{}{}{}.{}", stem, BACKUP_MARKER, timestamp, extension));
        let mut attempt = 1;
        while backup_path.exists() {
            backup_path = backup_dir.join(format!(
                "{}{}{}_{}.{}",
                stem, BACKUP_MARKER, timestamp, attempt, extension
            ));
            attempt += 1;
        }

        fs::copy(events_path, &backup_path).with_context(|| {
            format!("Failed to copy events from {:?} to {:?}", events_path, backup_path)
        })?;

        log::info!("Created backup: {:?}", backup_path);
        Ok(backup_path)
    }

    /// Restore the events file from a backup
    ///
    /// The backup must parse as a valid events file. The current file, if any,
    /// is kept alongside as `<name>.before_restore`.
    pub fn restore_backup(backup_path: &Path, events_path: &Path) -> Result<()> {
        if !backup_path.exists() {
            anyhow::bail!("Backup file does not exist: {:?}", backup_path);
        }

        Self::verify_events_file(backup_path)?;

        if events_path.exists() {
            let mut safety_name = events_path.as_os_str().to_owned();
            safety_name.push(".before_restore");
            let safety_backup = PathBuf::from(safety_name);
            fs::copy(events_path, &safety_backup)
                .context("Failed to create safety backup before restore")?;
            log::info!("Created safety backup: {:?}", safety_backup);
        }

        if let Some(parent) = events_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create events directory: {:?}", parent))?;
        }

        fs::copy(backup_path, events_path).with_context(|| {
            format!("Failed to restore backup from {:?} to {:?}", backup_path, events_path)
        })?;

        log::info!("Restored backup from {:?} to {:?}", backup_path, events_path);
        Ok(())
    }

    /// List all backups in `backup_dir`, newest first
    pub fn list_backups(backup_dir: &Path) -> Result<Vec<BackupInfo>> {
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(backup_dir)
            .with_context(|| format!("Failed to read backup directory: {:?}", backup_dir))?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            let is_backup = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains(BACKUP_MARKER));
            if path.is_file() && is_backup {
                if let Ok(info) = BackupInfo::from_path(path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(backups)
    }

    /// Delete old backups, keeping only the `keep_count` most recent
    pub fn cleanup_old_backups(backup_dir: &Path, keep_count: usize) -> Result<usize> {
        let mut backups = Self::list_backups(backup_dir)?;

        if backups.len() <= keep_count {
            return Ok(0);
        }

        let to_remove = backups.split_off(keep_count);
        let mut removed_count = 0;

        for backup in to_remove {
            if let Err(e) = fs::remove_file(&backup.path) {
                log::warn!("Failed to delete old backup {:?}: {}", backup.path, e);
            } else {
                log::info!("Deleted old backup: {:?}", backup.path);
                removed_count += 1;
            }
        }

        Ok(removed_count)
    }

    fn verify_events_file(path: &Path) -> Result<()> {
        let file = fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        EventStore::load(BufReader::new(file))
            .with_context(|| format!("Backup is not a valid events file: {:?}", path))?;
        Ok(())
    }

    /// Get human-readable size string from bytes
    pub fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{} bytes", bytes)
        }
    }
}
