//! Host environment classification.
//!
//! The core never inspects the running process to decide where it lives. The
//! collaborator computes a [`HostClassification`] once and threads it through
//! synthesis and multiplexer calls. [`detect_with`] is the helper the CLI uses
//! to do that computation from env vars and the compile target.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the launching process runs and how it reaches POSIX tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostClassification {
    /// Running inside the POSIX subsystem; commands execute directly.
    HostedInSubsystem,
    /// Running on the Windows host, reaching POSIX tools through the bridge.
    WindowsBridging,
    /// Running on the Windows host, targeting a native Windows shell.
    WindowsNative,
    /// Running on a native POSIX host.
    NativePosix,
}

impl HostClassification {
    pub const ALL: [HostClassification; 4] = [
        Self::HostedInSubsystem,
        Self::WindowsBridging,
        Self::WindowsNative,
        Self::NativePosix,
    ];

    /// True for both Windows-host states.
    pub fn is_windows_host(self) -> bool {
        matches!(self, Self::WindowsBridging | Self::WindowsNative)
    }

    /// True when POSIX tools must be reached through the bridge executable.
    pub fn needs_bridge(self) -> bool {
        self.is_windows_host()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HostedInSubsystem => "hosted-in-subsystem",
            Self::WindowsBridging => "windows-bridging",
            Self::WindowsNative => "windows-native",
            Self::NativePosix => "native-posix",
        }
    }
}

impl fmt::Display for HostClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostClassification {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|host| host.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown host classification `{raw}` (expected one of: {})",
                    Self::ALL.map(|h| h.as_str()).join(", ")
                )
            })
    }
}

/// Classify the current process from env lookups and the target OS.
///
/// Subsystem markers win over the OS check; a Windows build defaults to the
/// bridging state since the default profile targets the subsystem.
pub fn detect_with<FEnv>(env_lookup: FEnv, target_is_windows: bool) -> HostClassification
where
    FEnv: Fn(&str) -> Option<String>,
{
    let has = |name: &str| env_lookup(name).is_some_and(|v| !v.trim().is_empty());
    if has("WSL_DISTRO_NAME") || has("WSL_INTEROP") {
        return HostClassification::HostedInSubsystem;
    }
    if target_is_windows {
        return HostClassification::WindowsBridging;
    }
    HostClassification::NativePosix
}

/// Classify the current process using the real environment.
pub fn detect() -> HostClassification {
    detect_with(|name| std::env::var(name).ok(), cfg!(windows))
}
