//! Default configuration constants.

/// Embedded default `launchdeck.toml` written by `launchdeck init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/launchdeck.toml");
/// Directory under the config root holding the global config file.
pub(super) const CONFIG_DIR_NAME: &str = "launchdeck";
/// Config file name, both local and global.
pub(super) const CONFIG_FILE_NAME: &str = "launchdeck.toml";
