//! `FileConfig` to `Config` resolution and load-time validation.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::ConfigError;
use crate::host::HostClassification;
use crate::profile::is_builtin_id;
use crate::tree::{walk, Node};

use super::types::FileConfig;
use super::{Config, ConfigDiagnostics, LaunchConfig, MultiplexerSettings};

/// Parse a host setting: `"auto"` (or blank) means detect.
pub(super) fn parse_host_setting(
    raw: &str,
    key: &str,
) -> Result<Option<HostClassification>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    trimmed
        .parse::<HostClassification>()
        .map(Some)
        .map_err(|msg| ConfigError::Invalid(format!("{key}: {msg}")))
}

pub(super) fn resolve_file_config(parsed: FileConfig) -> Result<Config, ConfigError> {
    let host = match parsed.launch.host.as_deref() {
        Some(raw) => parse_host_setting(raw, "launch.host")?,
        None => None,
    };
    let default_profile = parsed
        .launch
        .default_profile
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let defaults = MultiplexerSettings::default();
    let multiplexer = MultiplexerSettings {
        probe_timeout: parsed
            .multiplexer
            .probe_timeout_ms
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or(defaults.probe_timeout),
        list_timeout: parsed
            .multiplexer
            .list_timeout_ms
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or(defaults.list_timeout),
    };

    Ok(Config {
        launch: LaunchConfig {
            host,
            default_profile,
        },
        bridge: parsed.bridge,
        multiplexer,
        profiles: parsed.profiles,
        tree: parsed.tree,
    })
}

/// Record non-fatal problems that would otherwise surface as silent fallbacks.
pub(super) fn collect_config_warnings(config: &Config, diagnostics: &mut ConfigDiagnostics) {
    let mut user_ids = BTreeSet::new();
    for profile in &config.profiles {
        if is_builtin_id(&profile.id) {
            diagnostics.warnings.push(format!(
                "profile `{}` reuses a built-in id and is ignored",
                profile.id
            ));
        } else if !user_ids.insert(profile.id.as_str()) {
            diagnostics.warnings.push(format!(
                "profile id `{}` is defined more than once; the first definition wins",
                profile.id
            ));
        }
    }

    let catalog = config.catalog();
    if let Some(id) = catalog.default_profile_id() {
        if catalog.get(id).is_none() {
            diagnostics.warnings.push(format!(
                "default profile `{id}` does not exist; the host default is used instead"
            ));
        }
    }

    let mut node_ids = BTreeSet::new();
    for (_, node) in walk(&config.tree) {
        if !node_ids.insert(node.id()) {
            diagnostics
                .warnings
                .push(format!("node id `{}` appears more than once in the tree", node.id()));
        }
        let Node::Task(task) = node else {
            continue;
        };
        if task.path.trim().is_empty() {
            diagnostics
                .warnings
                .push(format!("task `{}` has an empty path", task.id));
        }
        if let Some(profile_id) = task.profile_id.as_deref() {
            if catalog.get(profile_id).is_none() {
                diagnostics.warnings.push(format!(
                    "task `{}` references unknown profile `{profile_id}`; the default is used instead",
                    task.id
                ));
            }
        }
    }
}

/// Sort and deduplicate diagnostic strings for stable output.
pub(super) fn dedupe_diagnostics(diagnostics: &mut ConfigDiagnostics) {
    diagnostics.warnings.sort();
    diagnostics.warnings.dedup();
}
