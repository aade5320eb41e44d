//! Shell profiles: the data model, built-in set, lookup, and override merging.

mod builtins;
mod catalog;
mod resolve;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub use builtins::{builtin_profiles, is_builtin_id, BUILTIN_IDS};
pub use catalog::ProfileCatalog;
pub use resolve::resolve;

/// Which shell a profile launches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellKind {
    /// POSIX subsystem shell; bridged with `--cd` when launched from Windows.
    PosixSubsystem,
    /// POSIX subsystem shell, always entered via `-e bash -c`.
    PosixSubsystemRawBridge,
    WindowsPowershell,
    WindowsCmd,
    NativeBash,
    NativeZsh,
    /// Whatever the executor's default shell is; only a `cd` is emitted.
    #[default]
    HostDefault,
    /// Profile-supplied executable and args.
    Custom,
    /// Any value this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl ShellKind {
    /// Every kind a profile can name.
    pub const KNOWN: [ShellKind; 8] = [
        Self::PosixSubsystem,
        Self::PosixSubsystemRawBridge,
        Self::WindowsPowershell,
        Self::WindowsCmd,
        Self::NativeBash,
        Self::NativeZsh,
        Self::HostDefault,
        Self::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PosixSubsystem => "posix-subsystem",
            Self::PosixSubsystemRawBridge => "posix-subsystem-raw-bridge",
            Self::WindowsPowershell => "windows-powershell",
            Self::WindowsCmd => "windows-cmd",
            Self::NativeBash => "native-bash",
            Self::NativeZsh => "native-zsh",
            Self::HostDefault => "host-default",
            Self::Custom => "custom",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShellKind {
    type Err = String;

    /// Strict parse for user input; unlike deserialization, unrecognized
    /// names are an error rather than `Unknown`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown shell kind `{raw}` (expected one of: {})",
                    Self::KNOWN.map(|k| k.as_str()).join(", ")
                )
            })
    }
}

/// How a multiplexer-enabled profile enters its session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MultiplexMode {
    /// Do not enter a session even when enabled.
    None,
    #[default]
    AttachOrCreate,
    /// Create a fresh session, numbering the name until it is free.
    AlwaysNew,
    AttachOnly,
    /// Run `custom_command` with `{session}` substituted.
    Custom,
}

/// Per-multiplexer settings. Every field is optional so the same type serves
/// as a partial override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MultiplexerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<MultiplexMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_command: Option<String>,
}

impl MultiplexerConfig {
    /// Only an explicit `true` enables a multiplexer.
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }

    pub fn effective_mode(&self) -> MultiplexMode {
        self.mode.unwrap_or_default()
    }
}

/// Display colors for a profile's terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorPair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// A named shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub shell_kind: ShellKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_executable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmux: Option<MultiplexerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zellij: Option<MultiplexerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_commands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_commands: Option<Vec<String>>,
    /// Set only on the process-constant built-in profiles.
    #[serde(skip)]
    pub builtin: bool,
}

impl Profile {
    /// Settings for one multiplexer kind, if any were configured.
    pub fn multiplexer(&self, kind: crate::mux::MultiplexerKind) -> Option<&MultiplexerConfig> {
        match kind {
            crate::mux::MultiplexerKind::Tmux => self.tmux.as_ref(),
            crate::mux::MultiplexerKind::Zellij => self.zellij.as_ref(),
        }
    }

    /// True when `kind` is explicitly enabled on this profile.
    pub fn multiplexer_enabled(&self, kind: crate::mux::MultiplexerKind) -> bool {
        self.multiplexer(kind).is_some_and(MultiplexerConfig::is_enabled)
    }

    /// Non-blank custom executable, when one is configured.
    pub fn custom_executable(&self) -> Option<&str> {
        self.custom_executable
            .as_deref()
            .map(str::trim)
            .filter(|exe| !exe.is_empty())
    }
}

/// Task-level partial profile. Identity fields (`id`, `name`, `builtin`) are
/// deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_kind: Option<ShellKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_executable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmux: Option<MultiplexerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zellij: Option<MultiplexerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_commands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_commands: Option<Vec<String>>,
}
