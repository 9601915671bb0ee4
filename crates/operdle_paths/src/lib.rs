//! Locations of files read and written by Operdle.
//!
//! Preferences go in the user's config directory and progress in the user's
//! data directory. Setting `OPERDLE_HOME` puts both in that directory instead.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};

/// Environment variable that overrides the directory for all files.
pub const HOME_ENV_VAR: &str = "OPERDLE_HOME";

const PREFS_FILE_NAME: &str = "operdle-prefs.yaml";
const PROGRESS_FILE_NAME: &str = "operdle-progress.json";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Location {
    Config,
    Data,
}

/// Returns the user preferences file.
pub fn prefs_file() -> Result<PathBuf> {
    Ok(dir(Location::Config)?.join(PREFS_FILE_NAME))
}
/// Returns the file storing completed puzzles.
pub fn progress_file() -> Result<PathBuf> {
    Ok(dir(Location::Data)?.join(PROGRESS_FILE_NAME))
}

fn dir(location: Location) -> Result<PathBuf> {
    let home_override = std::env::var_os(HOME_ENV_VAR).filter(|s| !s.is_empty());
    resolve_dir(location, home_override, || {
        ProjectDirs::from("", "", "Operdle")
    })
}

fn resolve_dir(
    location: Location,
    home_override: Option<OsString>,
    project_dirs: impl FnOnce() -> Option<ProjectDirs>,
) -> Result<PathBuf> {
    if let Some(home) = home_override {
        return Ok(PathBuf::from(home));
    }
    let dirs = project_dirs().ok_or_eyre(format!(
        "unable to locate a home directory; set {HOME_ENV_VAR} to choose one",
    ))?;
    Ok(match location {
        Location::Config => dirs.config_dir(),
        Location::Data => dirs.data_dir(),
    }
    .to_path_buf())
}

/// Renames a file so that a fresh one can take its place. The backup sits
/// next to the original with the local time in its name. Emits a log message
/// indicating success or failure.
pub fn move_to_backup_file(original: &Path) {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    let backup = backup_path(original, now);
    match std::fs::rename(original, &backup) {
        Ok(()) => log::warn!("moved {} to {}", original.display(), backup.display()),
        Err(e) if original.exists() => {
            log::error!("error backing up {}: {e}", original.display());
        }
        Err(_) => (),
    }
}

fn backup_path(original: &Path, now: time::OffsetDateTime) -> PathBuf {
    let stem = original
        .file_stem()
        .map_or("unknown".into(), |s| s.to_string_lossy());
    let extension = original
        .extension()
        .map_or("txt".into(), |s| s.to_string_lossy());
    let (date, time) = (now.date(), now.time());
    original.with_file_name(format!(
        "{stem}_{:04}-{:02}-{:02}_{:02}-{:02}-{:02}_bak.{extension}",
        date.year(),
        u8::from(date.month()),
        date.day(),
        time.hour(),
        time.minute(),
        time.second(),
    ))
}
