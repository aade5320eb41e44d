//! Config-file source discovery.
//!
//! Source order: explicit path > `./launchdeck.toml` > global file > built-in
//! defaults.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConfigSource {
    /// Config loaded from explicit `--config` path.
    Explicit(PathBuf),
    /// Config loaded from `./launchdeck.toml`.
    Local,
    /// Config loaded from the per-user config directory.
    Global(PathBuf),
    /// No file found; runtime defaults were used.
    BuiltInDefaults,
}

impl ConfigSource {
    pub(super) fn path(&self) -> Option<PathBuf> {
        match self {
            Self::Explicit(path) | Self::Global(path) => Some(path.clone()),
            Self::Local => Some(PathBuf::from(CONFIG_FILE_NAME)),
            Self::BuiltInDefaults => None,
        }
    }
}

/// Read config text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist; a missing file is an error, not a fallthrough.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }

    if let Some(dir) = config_root() {
        let global = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "missing")
    }

    #[test]
    fn explicit_path_wins_and_must_exist() {
        let (text, source) = read_config_text_with_sources(
            Some("/etc/custom.toml"),
            &|path: &Path| Ok(path.display().to_string()),
            &|| None,
        )
        .unwrap();
        assert_eq!(text, "/etc/custom.toml");
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/etc/custom.toml")));

        let err = read_config_text_with_sources(
            Some("/nope.toml"),
            &|_: &Path| Err(not_found()),
            &|| None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn local_file_beats_global() {
        let read = |path: &Path| -> io::Result<String> {
            if path == Path::new("launchdeck.toml") {
                Ok("local".to_string())
            } else {
                Ok("global".to_string())
            }
        };
        let (text, source) =
            read_config_text_with_sources(None, &read, &|| Some(PathBuf::from("/cfg"))).unwrap();
        assert_eq!(text, "local");
        assert_eq!(source, ConfigSource::Local);
    }

    #[test]
    fn global_then_defaults() {
        let read = |path: &Path| -> io::Result<String> {
            if path == Path::new("/cfg/launchdeck/launchdeck.toml") {
                Ok("global".to_string())
            } else {
                Err(not_found())
            }
        };
        let (text, source) =
            read_config_text_with_sources(None, &read, &|| Some(PathBuf::from("/cfg"))).unwrap();
        assert_eq!(text, "global");
        assert_eq!(source.path(), Some(PathBuf::from("/cfg/launchdeck/launchdeck.toml")));

        let (text, source) =
            read_config_text_with_sources(None, &|_: &Path| Err(not_found()), &|| None).unwrap();
        assert!(text.is_empty());
        assert_eq!(source, ConfigSource::BuiltInDefaults);
        assert_eq!(source.path(), None);
    }
}
