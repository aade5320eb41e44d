//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`LAUNCHDECK_HOST`, `LAUNCHDECK_PROFILE`,
//!    `LAUNCHDECK_BRIDGE`, `LAUNCHDECK_DISTRO`, `LAUNCHDECK_PROBE_TIMEOUT_MS`,
//!    `LAUNCHDECK_LIST_TIMEOUT_MS`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./launchdeck.toml in the current directory
//! 4. $XDG_CONFIG_HOME/launchdeck/launchdeck.toml (or
//!    ~/.config/launchdeck/launchdeck.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod init;
mod loader;
mod resolve;
mod sources;
mod types;

pub use init::{config_root_dir, default_config_path, initialize_config};
pub use loader::{load_config, load_config_with_diagnostics};
pub use types::{
    Config, ConfigDiagnostics, ConfigInitResult, LaunchConfig, LoadedConfig, MultiplexerSettings,
};
