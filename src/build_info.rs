//! Compile-time build metadata for `--version` and `--help`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("LAUNCHDECK_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("LAUNCHDECK_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `launchdeck --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("LAUNCHDECK_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("LAUNCHDECK_BUILD_TIMESTAMP")
);

/// One-line build summary logged at startup.
pub fn build_summary() -> String {
    format!("launchdeck v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
