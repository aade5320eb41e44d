//! Process-constant built-in profiles.
//!
//! Built-ins are identified by a fixed id set. User profiles may not replace
//! them; the config loader drops such entries with a diagnostic.

use super::{MultiplexMode, MultiplexerConfig, Profile, ShellKind};

pub const POSIX_SUBSYSTEM: &str = "posix-subsystem";
pub const POSIX_SUBSYSTEM_RAW_BRIDGE: &str = "posix-subsystem-raw-bridge";
pub const POSIX_SUBSYSTEM_TMUX: &str = "posix-subsystem-tmux";
pub const WINDOWS_POWERSHELL: &str = "windows-powershell";
pub const WINDOWS_CMD: &str = "windows-cmd";
pub const NATIVE_BASH: &str = "native-bash";
pub const NATIVE_ZSH: &str = "native-zsh";
pub const NATIVE_BASH_TMUX: &str = "native-bash-tmux";
pub const NATIVE_BASH_ZELLIJ: &str = "native-bash-zellij";
pub const HOST_DEFAULT: &str = "host-default";

/// Every reserved built-in id.
pub const BUILTIN_IDS: [&str; 10] = [
    POSIX_SUBSYSTEM,
    POSIX_SUBSYSTEM_RAW_BRIDGE,
    POSIX_SUBSYSTEM_TMUX,
    WINDOWS_POWERSHELL,
    WINDOWS_CMD,
    NATIVE_BASH,
    NATIVE_ZSH,
    NATIVE_BASH_TMUX,
    NATIVE_BASH_ZELLIJ,
    HOST_DEFAULT,
];

/// True when `id` names a built-in profile.
pub fn is_builtin_id(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}

/// The full built-in profile set, in [`BUILTIN_IDS`] order.
pub fn builtin_profiles() -> Vec<Profile> {
    vec![
        plain(POSIX_SUBSYSTEM, "Subsystem", ShellKind::PosixSubsystem),
        plain(
            POSIX_SUBSYSTEM_RAW_BRIDGE,
            "Subsystem (raw bridge)",
            ShellKind::PosixSubsystemRawBridge,
        ),
        Profile {
            tmux: Some(attach_or_create()),
            ..plain(POSIX_SUBSYSTEM_TMUX, "Subsystem + tmux", ShellKind::PosixSubsystem)
        },
        plain(WINDOWS_POWERSHELL, "PowerShell", ShellKind::WindowsPowershell),
        plain(WINDOWS_CMD, "Command Prompt", ShellKind::WindowsCmd),
        plain(NATIVE_BASH, "Bash", ShellKind::NativeBash),
        plain(NATIVE_ZSH, "Zsh", ShellKind::NativeZsh),
        Profile {
            tmux: Some(attach_or_create()),
            ..plain(NATIVE_BASH_TMUX, "Bash + tmux", ShellKind::NativeBash)
        },
        Profile {
            zellij: Some(attach_or_create()),
            ..plain(NATIVE_BASH_ZELLIJ, "Bash + zellij", ShellKind::NativeBash)
        },
        plain(HOST_DEFAULT, "Host default", ShellKind::HostDefault),
    ]
}

fn plain(id: &str, name: &str, shell_kind: ShellKind) -> Profile {
    Profile {
        id: id.to_string(),
        name: name.to_string(),
        shell_kind,
        builtin: true,
        ..Default::default()
    }
}

fn attach_or_create() -> MultiplexerConfig {
    MultiplexerConfig {
        enabled: Some(true),
        mode: Some(MultiplexMode::AttachOrCreate),
        session_name: None,
        custom_command: None,
    }
}
