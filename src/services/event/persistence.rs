use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use super::EventStore;
use crate::error::{CalendarError, CalendarResult};
use crate::models::settings::{BackupSettings, MissingFilePolicy};
use crate::services::backup::BackupService;

/// Load the events file at `path`.
///
/// A missing file is handled according to `missing`; every other failure,
/// including a single corrupt record, aborts the load.
pub fn load_events(path: &Path, missing: MissingFilePolicy) -> CalendarResult<EventStore> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return match missing {
                MissingFilePolicy::Empty => {
                    log::warn!(
                        "Events file {} not found, starting with an empty calendar",
                        path.display()
                    );
                    Ok(EventStore::new())
                }
                MissingFilePolicy::Fail => Err(CalendarError::Io(err)),
            };
        }
        Err(err) => return Err(err.into()),
    };

    let store = EventStore::load(BufReader::new(file))?;
    log::info!("Loaded {} event(s) from {}", store.len(), path.display());
    Ok(store)
}

/// Rewrite the events file at `path` from `store`.
///
/// The previous file is backed up first when backups are enabled. The new
/// content is written to a sibling temp file and renamed into place.
pub fn save_events(path: &Path, store: &EventStore, backup: &BackupSettings) -> CalendarResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if backup.enabled && path.exists() {
        backup_previous(path, backup.keep);
    }

    write_via_temp(path, |writer| store.save(writer))?;

    log::info!("Saved {} event(s) to {}", store.len(), path.display());
    Ok(())
}

/// Directory that holds backups of the events file at `path`.
pub fn backup_dir_for(path: &Path) -> PathBuf {
    path.parent()
        .map(|parent| parent.join("backups"))
        .unwrap_or_else(|| PathBuf::from("backups"))
}

fn backup_previous(path: &Path, keep: usize) {
    let backup_dir = backup_dir_for(path);
    if let Err(e) = BackupService::create_backup(path, &backup_dir) {
        log::warn!("Failed to back up {} before saving: {:#}", path.display(), e);
        return;
    }

    match BackupService::cleanup_old_backups(&backup_dir, keep) {
        Ok(removed) if removed > 0 => log::info!("Cleaned up {} old backup(s)", removed),
        Ok(_) => {}
        Err(e) => log::warn!("Failed to clean up old backups: {:#}", e),
    }
}

/// Write to a sibling temp file, then rename it over `path`.
/// The temp file is removed again if any step fails.
fn write_via_temp<F>(path: &Path, write: F) -> CalendarResult<()>
where
    F: FnOnce(BufWriter<File>) -> CalendarResult<()>,
{
    let tmp_path = temp_path_for(path);
    let result = File::create(&tmp_path)
        .map_err(CalendarError::from)
        .and_then(|file| write(BufWriter::new(file)))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(CalendarError::from));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("Failed to remove temp file {}: {}", tmp_path.display(), e);
            }
        }
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "events".as_ref()));
    name.push(".tmp");
    path.with_file_name(name)
}
