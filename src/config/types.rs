//! Configuration data model.
//!
//! `FileConfig` mirrors the TOML document as written. `Config` is the
//! resolved form the rest of the crate consumes.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::bridge::Bridge;
use crate::host::{self, HostClassification};
use crate::mux::{AdapterContext, DEFAULT_LIST_TIMEOUT, DEFAULT_PROBE_TIMEOUT};
use crate::profile::{Profile, ProfileCatalog};
use crate::tree::Node;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub launch: LaunchConfig,
    pub bridge: Bridge,
    pub multiplexer: MultiplexerSettings,
    /// User profiles, in file order.
    pub profiles: Vec<Profile>,
    /// Declared task/folder forest.
    pub tree: Vec<Node>,
}

impl Config {
    /// Host classification to use: the configured one, else detected.
    pub fn host(&self) -> HostClassification {
        self.launch.host.unwrap_or_else(host::detect)
    }

    /// Built-ins plus this config's user profiles.
    pub fn catalog(&self) -> ProfileCatalog {
        ProfileCatalog::new(self.profiles.clone(), self.launch.default_profile.clone())
    }

    /// Adapter context for `host` carrying this config's bridge and timeouts.
    pub fn adapter_context(&self, host: HostClassification) -> AdapterContext {
        AdapterContext {
            host,
            bridge: self.bridge.clone(),
            probe_timeout: self.multiplexer.probe_timeout,
            list_timeout: self.multiplexer.list_timeout,
        }
    }
}

/// Settings under `[launch]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchConfig {
    /// `None` means detect at startup.
    pub host: Option<HostClassification>,
    pub default_profile: Option<String>,
}

/// Settings under `[multiplexer]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplexerSettings {
    pub probe_timeout: Duration,
    pub list_timeout: Duration,
}

impl Default for MultiplexerSettings {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            list_timeout: DEFAULT_LIST_TIMEOUT,
        }
    }
}

/// Non-fatal problems found while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    pub warnings: Vec<String>,
}

impl ConfigDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Configuration payload plus load-time diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub diagnostics: ConfigDiagnostics,
    /// File the config was read from; `None` when only defaults applied.
    pub source: Option<PathBuf>,
}

/// Result of `launchdeck init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigInitResult {
    Created {
        path: PathBuf,
    },
    AlreadyInitialized {
        path: PathBuf,
    },
    Overwritten {
        path: PathBuf,
        backup_path: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub launch: FileLaunch,
    pub bridge: Bridge,
    pub multiplexer: FileMultiplexer,
    pub profiles: Vec<Profile>,
    pub tree: Vec<Node>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileLaunch {
    /// `"auto"` or a host classification name.
    pub host: Option<String>,
    pub default_profile: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileMultiplexer {
    pub probe_timeout_ms: Option<u64>,
    pub list_timeout_ms: Option<u64>,
}
