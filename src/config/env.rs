//! `LAUNCHDECK_*` environment overrides.
//!
//! Environment values win over the config file. Blank values are ignored.

use std::time::Duration;

use crate::error::ConfigError;

use super::resolve::parse_host_setting;
use super::Config;

pub(super) const ENV_HOST: &str = "LAUNCHDECK_HOST";
pub(super) const ENV_PROFILE: &str = "LAUNCHDECK_PROFILE";
pub(super) const ENV_BRIDGE: &str = "LAUNCHDECK_BRIDGE";
pub(super) const ENV_DISTRO: &str = "LAUNCHDECK_DISTRO";
pub(super) const ENV_PROBE_TIMEOUT_MS: &str = "LAUNCHDECK_PROBE_TIMEOUT_MS";
pub(super) const ENV_LIST_TIMEOUT_MS: &str = "LAUNCHDECK_LIST_TIMEOUT_MS";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| {
        env_lookup(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    if let Some(host) = lookup(ENV_HOST) {
        config.launch.host = parse_host_setting(&host, ENV_HOST)?;
    }
    if let Some(profile) = lookup(ENV_PROFILE) {
        config.launch.default_profile = Some(profile);
    }
    if let Some(executable) = lookup(ENV_BRIDGE) {
        config.bridge.executable = executable;
    }
    if let Some(distro) = lookup(ENV_DISTRO) {
        config.bridge.distro = Some(distro);
    }
    if let Some(ms) = lookup(ENV_PROBE_TIMEOUT_MS) {
        config.multiplexer.probe_timeout = parse_timeout_ms(&ms, ENV_PROBE_TIMEOUT_MS)?;
    }
    if let Some(ms) = lookup(ENV_LIST_TIMEOUT_MS) {
        config.multiplexer.list_timeout = parse_timeout_ms(&ms, ENV_LIST_TIMEOUT_MS)?;
    }
    Ok(())
}

/// Parse a millisecond count, clamped to at least 1ms so a zero never
/// disables the bound.
pub(super) fn parse_timeout_ms(raw: &str, key: &str) -> Result<Duration, ConfigError> {
    let parsed = raw.trim().parse::<u64>().map_err(|_| {
        ConfigError::Invalid(format!(
            "invalid {key} value `{raw}`: expected positive integer milliseconds"
        ))
    })?;
    Ok(Duration::from_millis(parsed.max(1)))
}
