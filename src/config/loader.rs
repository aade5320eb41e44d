//! Config loading: pick a source, parse, resolve, layer the environment on
//! top, then collect warnings.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::env::apply_env_overrides;
use super::init::config_root_dir;
use super::resolve::{collect_config_warnings, dedupe_diagnostics, resolve_file_config};
use super::sources::read_config_text_with_sources;
use super::types::FileConfig;
use super::{Config, ConfigDiagnostics, LoadedConfig};

/// Load the effective [`Config`], discarding warnings.
///
/// `explicit` is the `--config` path; when given it must exist.
pub fn load_config(explicit: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_diagnostics(explicit).map(|loaded| loaded.config)
}

/// Like [`load_config`], but keeps the warnings and the file that was read.
pub fn load_config_with_diagnostics(explicit: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_with_diagnostics_from_sources(
        explicit,
        |path| std::fs::read_to_string(path),
        |key| std::env::var(key).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_with_diagnostics_from_sources<R, E, D>(
    explicit: Option<&str>,
    read: R,
    env: E,
    root: D,
) -> Result<LoadedConfig, ConfigError>
where
    R: Fn(&Path) -> std::io::Result<String>,
    E: Fn(&str) -> Option<String>,
    D: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text_with_sources(explicit, &read, &root)?;
    debug!(?source, "reading launchdeck config");

    let file: FileConfig = toml::from_str(&text)?;
    let mut config = resolve_file_config(file)?;
    apply_env_overrides(&mut config, &env)?;

    let mut diagnostics = ConfigDiagnostics::default();
    collect_config_warnings(&config, &mut diagnostics);
    dedupe_diagnostics(&mut diagnostics);
    if !diagnostics.is_empty() {
        debug!(count = diagnostics.warnings.len(), "config loaded with warnings");
    }

    let source = source.path();
    Ok(LoadedConfig { config, diagnostics, source })
}
