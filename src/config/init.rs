//! Config-path helpers and `launchdeck init`.
//!
//! Writes use race-safe create semantics so two processes bootstrapping at
//! once never clobber each other's file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use super::ConfigInitResult;

/// Default per-user config path (`~/.config/launchdeck/launchdeck.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Write the bundled template to `path`, or to the default per-user path.
///
/// An existing file is left alone unless `force` is set, in which case it is
/// moved aside as `<name>.bak-<unix-secs>` before being replaced.
pub fn initialize_config(
    path: Option<&Path>,
    force: bool,
) -> Result<ConfigInitResult, ConfigError> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| {
            ConfigError::Invalid(
                "no home or XDG config directory to place launchdeck.toml in".into(),
            )
        })?,
    };
    initialize_config_at_path(&target, force)
}

pub(super) fn initialize_config_at_path(
    target: &Path,
    force: bool,
) -> Result<ConfigInitResult, ConfigError> {
    let path = target.to_path_buf();
    if let Some(dir) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    match (target.exists(), force) {
        (true, false) => Ok(ConfigInitResult::AlreadyInitialized { path }),
        (true, true) => {
            let backup_path = backup_path_for(target);
            std::fs::rename(target, &backup_path)?;
            std::fs::write(target, DEFAULT_CONFIG_TEMPLATE)?;
            Ok(ConfigInitResult::Overwritten { path, backup_path })
        }
        (false, _) => {
            if write_new(target)? {
                Ok(ConfigInitResult::Created { path })
            } else {
                // Lost a race with another writer.
                Ok(ConfigInitResult::AlreadyInitialized { path })
            }
        }
    }
}

/// Create `target` exclusively and fill it with the template.
/// Returns `false` when the file appeared in the meantime.
fn write_new(target: &Path) -> Result<bool, ConfigError> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?;
    Ok(true)
}

fn backup_path_for(target: &Path) -> PathBuf {
    let stem = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    let first = target.with_file_name(format!("{stem}.bak-{secs}"));
    std::iter::once(first)
        .chain((1..100).map(|n| target.with_file_name(format!("{stem}.bak-{secs}-{n}"))))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| {
            target.with_file_name(format!("{stem}.bak-{secs}-{}", std::process::id()))
        })
}

/// Base config directory. `$XDG_CONFIG_HOME` wins when set, otherwise
/// `~/.config`, otherwise whatever the platform reports.
pub fn config_root_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .or_else(dirs::config_dir)
}
