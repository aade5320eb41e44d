//! Path notation conversion between the POSIX-mount and Windows-drive dialects.
//!
//! Every function here is total: input that matches no known shape comes back
//! with only its separators normalized (or untouched), never as an error.
//! Stored task paths are never rewritten; conversion happens at synthesis time
//! and is idempotent once a path has been converted in either direction.

use crate::profile::ShellKind;

/// Distro name fabricated when a subsystem-rooted path is mapped onto the
/// Windows share. The real distro cannot be known from the path alone.
pub const DEFAULT_DISTRO: &str = "Ubuntu";

/// UNC share prefix used when synthesizing subsystem-share paths.
pub const SUBSYSTEM_SHARE: &str = r"\\wsl$";

/// Convert a path into the POSIX-mount dialect (`/mnt/<drive>/...`).
///
/// Subsystem-share paths (`\\<share>\<distro>\<rest>`) drop the share and
/// distro segments, so `\\wsl$\Debian\home\u` and `\\wsl$\Ubuntu\home\u` both
/// map to `/home/u`.
pub fn to_posix_mount(path: &str) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }
    if let Some(rest) = unc_share_rest(path) {
        return format!("/{}", rest.replace('\\', "/"));
    }
    if let Some((letter, rest)) = split_drive(path) {
        let rest = rest
            .strip_prefix(['\\', '/'])
            .unwrap_or(rest)
            .replace('\\', "/");
        return format!("/mnt/{}/{rest}", letter.to_ascii_lowercase());
    }
    path.replace('\\', "/")
}

/// Convert a path into the Windows drive-letter dialect (`C:\...`).
///
/// POSIX paths outside `/mnt/<drive>` are placed on the subsystem share under
/// [`DEFAULT_DISTRO`]; the reverse conversion discards that segment again.
pub fn to_windows_drive(path: &str) -> String {
    if split_drive(path).is_some() || path.starts_with(r"\\") {
        return path.to_string();
    }
    if let Some((letter, rest)) = split_mount(path) {
        return format!(
            "{}:\\{}",
            letter.to_ascii_uppercase(),
            rest.replace('/', "\\")
        );
    }
    if path.starts_with('/') {
        return format!(
            "{SUBSYSTEM_SHARE}\\{DEFAULT_DISTRO}{}",
            path.replace('/', "\\")
        );
    }
    path.replace('/', "\\")
}

/// Quote `path` for the command language of `shell`.
///
/// POSIX shells get single quotes with `'\''` splicing; the console shell gets
/// double quotes with doubled embedded quotes; the scripting shell gets double
/// quotes with backtick-escaped embedded quotes. Other kinds pass through.
pub fn escape_for_shell(path: &str, shell: ShellKind) -> String {
    match shell {
        ShellKind::PosixSubsystem
        | ShellKind::PosixSubsystemRawBridge
        | ShellKind::NativeBash
        | ShellKind::NativeZsh => posix_quote(path),
        ShellKind::WindowsCmd => format!("\"{}\"", path.replace('"', "\"\"")),
        ShellKind::WindowsPowershell => format!("\"{}\"", path.replace('"', "`\"")),
        ShellKind::HostDefault | ShellKind::Custom | ShellKind::Unknown => path.to_string(),
    }
}

/// Single-quote a string for POSIX shells.
pub fn posix_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "'\\''"))
}

/// Last non-empty path segment, or `"Untitled"`.
pub fn folder_display_name(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized
        .trim_end_matches('/')
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Split `X:rest` into drive letter and remainder.
fn split_drive(path: &str) -> Option<(char, &str)> {
    let mut chars = path.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    if chars.next() != Some(':') {
        return None;
    }
    Some((letter, &path[2..]))
}

/// Split `/mnt/<letter>[/rest]` (case-insensitive) into letter and remainder.
fn split_mount(path: &str) -> Option<(char, &str)> {
    let prefix = path.get(..5)?;
    if !prefix.eq_ignore_ascii_case("/mnt/") {
        return None;
    }
    let tail = &path[5..];
    let letter = tail.chars().next().filter(char::is_ascii_alphabetic)?;
    let after = &tail[1..];
    if after.is_empty() {
        return Some((letter, ""));
    }
    after.strip_prefix('/').map(|rest| (letter, rest))
}

/// Remainder after `\\<share>\<distro>\`, when `path` has that shape.
fn unc_share_rest(path: &str) -> Option<&str> {
    let body = path.strip_prefix(r"\\")?;
    let mut parts = body.splitn(3, '\\');
    let share = parts.next()?;
    let distro = parts.next()?;
    let rest = parts.next()?;
    if share.is_empty() || distro.is_empty() {
        return None;
    }
    Some(rest)
}
