//! Command synthesis: turns a resolved profile, task and host into a launch command.
//!
//! Synthesis is total. An unrecognized shell kind, a custom profile with no
//! executable, or a kind that cannot run on the given host is replaced by the
//! auto-detected default for that host before any command text is built.

pub mod session;

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::bridge::Bridge;
use crate::host::HostClassification;
use crate::mux::MultiplexerKind;
use crate::path_dialect::{escape_for_shell, posix_quote, to_posix_mount, to_windows_drive};
use crate::profile::{ColorPair, MultiplexMode, Profile, ProfileCatalog, ShellKind};
use crate::tree::Task;

pub use session::{
    effective_session_name, sanitize_session_name, session_matches, MAX_SESSION_NAME_LEN,
};

/// Shell executable the executor should use instead of its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellOverride {
    pub executable: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl ShellOverride {
    fn new(executable: &str, args: &[&str]) -> Self {
        Self {
            executable: executable.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

/// Multiplexer session a launch command enters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTarget {
    pub kind: MultiplexerKind,
    pub name: String,
    pub mode: MultiplexMode,
}

/// Everything the executor needs to open a terminal for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchCommand {
    pub label: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<ShellOverride>,
    /// Shell kind actually used after fallback.
    pub shell_kind: ShellKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionTarget>,
}

/// Host facts synthesis depends on.
#[derive(Debug, Clone, Copy)]
pub struct SynthContext<'a> {
    pub host: HostClassification,
    pub bridge: &'a Bridge,
}

/// Shell kind inferred when nothing usable is configured.
pub fn auto_shell_kind(host: HostClassification) -> ShellKind {
    match host {
        HostClassification::NativePosix => ShellKind::NativeBash,
        HostClassification::HostedInSubsystem
        | HostClassification::WindowsBridging
        | HostClassification::WindowsNative => ShellKind::PosixSubsystem,
    }
}

/// The shell kind synthesis will actually use for `profile` on `host`.
pub fn effective_shell_kind(profile: &Profile, host: HostClassification) -> ShellKind {
    let kind = profile.shell_kind;
    let usable = match kind {
        ShellKind::PosixSubsystem | ShellKind::PosixSubsystemRawBridge | ShellKind::HostDefault => {
            true
        }
        ShellKind::NativeBash | ShellKind::NativeZsh => !host.is_windows_host(),
        ShellKind::WindowsPowershell | ShellKind::WindowsCmd => host.is_windows_host(),
        ShellKind::Custom => {
            profile.custom_executable().is_some() && host != HostClassification::WindowsNative
        }
        ShellKind::Unknown => false,
    };
    if usable {
        return kind;
    }
    let fallback = auto_shell_kind(host);
    debug!(
        profile = %profile.id,
        configured = %kind,
        fallback = %fallback,
        %host,
        "shell kind not usable here; falling back"
    );
    fallback
}

/// Resolve the task's profile through `catalog`, then synthesize.
pub fn synthesize_task(task: &Task, catalog: &ProfileCatalog, ctx: SynthContext<'_>) -> LaunchCommand {
    let profile = catalog.resolved_for(task, ctx.host);
    synthesize(task, &profile, ctx)
}

/// Build the launch command for `task` under an already-resolved `profile`.
pub fn synthesize(task: &Task, profile: &Profile, ctx: SynthContext<'_>) -> LaunchCommand {
    let kind = effective_shell_kind(profile, ctx.host);
    let mut launch = LaunchCommand {
        label: task.display_name(),
        command: String::new(),
        shell: None,
        shell_kind: kind,
        env: profile.env.clone().unwrap_or_default(),
        colors: profile.colors.clone(),
        session: None,
    };

    match kind {
        ShellKind::PosixSubsystem | ShellKind::PosixSubsystemRawBridge
            if ctx.host.is_windows_host() =>
        {
            let session = session_target(task, profile);
            let body = posix_session_command(task, profile, session.as_ref(), "bash");
            let plain_shell = session.is_none() && !has_extra_commands(profile);
            launch.command = if kind == ShellKind::PosixSubsystem && plain_shell {
                ctx.bridge.cd_into(&to_windows_drive(&task.path))
            } else {
                ctx.bridge.wrap_shell(&body)
            };
            launch.shell = Some(ShellOverride::new("cmd.exe", &["/d", "/c"]));
            launch.session = session;
        }
        ShellKind::PosixSubsystem | ShellKind::PosixSubsystemRawBridge => {
            let session = session_target(task, profile);
            launch.command = posix_session_command(task, profile, session.as_ref(), "bash");
            launch.session = session;
        }
        ShellKind::NativeBash | ShellKind::NativeZsh => {
            let shell = if kind == ShellKind::NativeZsh { "zsh" } else { "bash" };
            let session = session_target(task, profile);
            launch.command = posix_session_command(task, profile, session.as_ref(), shell);
            launch.shell = Some(ShellOverride::new(shell, &["-c"]));
            launch.session = session;
        }
        ShellKind::Custom => {
            let session = session_target(task, profile);
            launch.command = posix_session_command(task, profile, session.as_ref(), "bash");
            let executable = profile.custom_executable().unwrap_or("bash");
            let args = profile
                .custom_args
                .clone()
                .unwrap_or_else(|| vec!["-c".to_string()]);
            launch.shell = Some(ShellOverride {
                executable: executable.to_string(),
                args,
            });
            launch.session = session;
        }
        ShellKind::WindowsPowershell => {
            let location = format!(
                "Set-Location '{}'",
                to_windows_drive(&task.path).replace('\'', "''")
            );
            launch.command = join_with_extras(profile, location, "; ");
            launch.shell = Some(ShellOverride::new(
                "powershell.exe",
                &["-NoLogo", "-NoExit", "-Command"],
            ));
        }
        ShellKind::WindowsCmd => {
            let location = format!(
                "cd /d {}",
                escape_for_shell(&to_windows_drive(&task.path), ShellKind::WindowsCmd)
            );
            launch.command = join_with_extras(profile, location, " && ");
            launch.shell = Some(ShellOverride::new("cmd.exe", &["/d", "/k"]));
        }
        ShellKind::HostDefault => {
            launch.command = if ctx.host.is_windows_host() {
                format!("cd '{}'", to_windows_drive(&task.path).replace('\'', "''"))
            } else {
                format!("cd {}", posix_quote(&to_posix_mount(&task.path)))
            };
        }
        ShellKind::Unknown => {
            // effective_shell_kind never yields Unknown.
            launch.command = format!("cd {}", posix_quote(&to_posix_mount(&task.path)));
        }
    }

    launch
}

/// First enabled multiplexer whose mode actually enters a session.
/// tmux is checked before zellij.
fn session_target(task: &Task, profile: &Profile) -> Option<SessionTarget> {
    MultiplexerKind::ALL.into_iter().find_map(|kind| {
        let config = profile.multiplexer(kind).filter(|cfg| cfg.is_enabled())?;
        let mode = config.effective_mode();
        if mode == MultiplexMode::None {
            return None;
        }
        Some(SessionTarget {
            kind,
            name: effective_session_name(task, config),
            mode,
        })
    })
}

fn multiplexer_clause(profile: &Profile, target: &SessionTarget) -> String {
    let kind = target.kind;
    match target.mode {
        MultiplexMode::AttachOnly => kind.attach_fragment(&target.name),
        MultiplexMode::AlwaysNew => kind.always_new_fragment(&target.name),
        MultiplexMode::Custom => {
            let custom = profile
                .multiplexer(kind)
                .and_then(|cfg| cfg.custom_command.as_deref())
                .map(str::trim)
                .filter(|cmd| !cmd.is_empty());
            match custom {
                Some(template) => template.replace("{session}", &posix_quote(&target.name)),
                None => kind.attach_or_create_fragment(&target.name),
            }
        }
        MultiplexMode::AttachOrCreate | MultiplexMode::None => {
            kind.attach_or_create_fragment(&target.name)
        }
    }
}

/// Shared POSIX clause chain: pre commands, `cd`, post commands, then either
/// the multiplexer entry or an `exec <shell>` keepalive, joined by ` && `.
fn posix_session_command(
    task: &Task,
    profile: &Profile,
    session: Option<&SessionTarget>,
    keepalive_shell: &str,
) -> String {
    let mut clauses = non_blank(profile.pre_commands.as_deref());
    clauses.push(format!("cd {}", posix_quote(&to_posix_mount(&task.path))));
    clauses.extend(non_blank(profile.post_commands.as_deref()));
    match session {
        Some(target) => clauses.push(multiplexer_clause(profile, target)),
        None => clauses.push(format!("exec {keepalive_shell}")),
    }
    clauses.join(" && ")
}

fn join_with_extras(profile: &Profile, location: String, separator: &str) -> String {
    let mut clauses = non_blank(profile.pre_commands.as_deref());
    clauses.push(location);
    clauses.extend(non_blank(profile.post_commands.as_deref()));
    clauses.join(separator)
}

fn has_extra_commands(profile: &Profile) -> bool {
    !non_blank(profile.pre_commands.as_deref()).is_empty()
        || !non_blank(profile.post_commands.as_deref()).is_empty()
}

fn non_blank(commands: Option<&[String]>) -> Vec<String> {
    commands
        .unwrap_or_default()
        .iter()
        .map(|cmd| cmd.trim())
        .filter(|cmd| !cmd.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MultiplexerConfig;

    fn task(name: &str, path: &str) -> Task {
        Task {
            id: "t1".into(),
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    fn profile(kind: ShellKind) -> Profile {
        Profile {
            id: "p".into(),
            name: "p".into(),
            shell_kind: kind,
            ..Default::default()
        }
    }

    fn tmux(mode: Option<MultiplexMode>) -> Option<MultiplexerConfig> {
        Some(MultiplexerConfig {
            enabled: Some(true),
            mode,
            ..Default::default()
        })
    }

    fn run(task: &Task, profile: &Profile, host: HostClassification) -> LaunchCommand {
        let bridge = Bridge::default();
        synthesize(task, profile, SynthContext { host, bridge: &bridge })
    }

    #[test]
    fn native_bash_builds_clause_chain_with_keepalive() {
        let p = Profile {
            pre_commands: Some(vec!["source .venv/bin/activate".into(), "  ".into()]),
            post_commands: Some(vec!["git status".into()]),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/srv/it's"), &p, HostClassification::NativePosix);
        assert_eq!(
            out.command,
            "source .venv/bin/activate && cd '/srv/it'\\''s' && git status && exec bash"
        );
        assert_eq!(out.shell, Some(ShellOverride::new("bash", &["-c"])));
        assert_eq!(out.label, "api");
        assert_eq!(out.session, None);
    }

    #[test]
    fn native_zsh_keeps_alive_with_zsh() {
        let out = run(
            &task("api", "/srv/api"),
            &profile(ShellKind::NativeZsh),
            HostClassification::NativePosix,
        );
        assert_eq!(out.command, "cd '/srv/api' && exec zsh");
        assert_eq!(out.shell.unwrap().executable, "zsh");
    }

    #[test]
    fn attach_or_create_uses_sanitized_task_name() {
        let p = Profile {
            tmux: tmux(Some(MultiplexMode::AttachOrCreate)),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("my project", "/srv/p"), &p, HostClassification::NativePosix);
        assert_eq!(
            out.command,
            "cd '/srv/p' && tmux new-session -A -s 'my_project'"
        );
        let session = out.session.unwrap();
        assert_eq!(session.name, "my_project");
        assert_eq!(session.kind, MultiplexerKind::Tmux);
    }

    #[test]
    fn multiplexer_needs_explicit_enable() {
        let p = Profile {
            tmux: Some(MultiplexerConfig {
                enabled: None,
                mode: Some(MultiplexMode::AttachOrCreate),
                ..Default::default()
            }),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/srv/api"), &p, HostClassification::NativePosix);
        assert_eq!(out.command, "cd '/srv/api' && exec bash");
    }

    #[test]
    fn mode_none_and_zellij_fallthrough() {
        let p = Profile {
            tmux: tmux(Some(MultiplexMode::None)),
            zellij: Some(MultiplexerConfig {
                enabled: Some(true),
                session_name: Some("ops".into()),
                ..Default::default()
            }),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/srv/api"), &p, HostClassification::NativePosix);
        assert_eq!(
            out.command,
            "cd '/srv/api' && zellij attach 'ops' 2>/dev/null || zellij --session 'ops'"
        );
        assert_eq!(out.session.unwrap().kind, MultiplexerKind::Zellij);
    }

    #[test]
    fn attach_only_and_custom_modes() {
        let attach = Profile {
            tmux: tmux(Some(MultiplexMode::AttachOnly)),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/a"), &attach, HostClassification::NativePosix);
        assert!(out.command.ends_with("tmux attach-session -t 'api'"));

        let custom = Profile {
            tmux: Some(MultiplexerConfig {
                enabled: Some(true),
                mode: Some(MultiplexMode::Custom),
                custom_command: Some("tmux new -A -s {session} -n main".into()),
                ..Default::default()
            }),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/a"), &custom, HostClassification::NativePosix);
        assert_eq!(out.command, "cd '/a' && tmux new -A -s 'api' -n main");

        let empty_custom = Profile {
            tmux: tmux(Some(MultiplexMode::Custom)),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/a"), &empty_custom, HostClassification::NativePosix);
        assert!(out.command.ends_with("tmux new-session -A -s 'api'"));
    }

    #[test]
    fn always_new_emits_numbering_loop() {
        let p = Profile {
            tmux: tmux(Some(MultiplexMode::AlwaysNew)),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("api", "/a"), &p, HostClassification::NativePosix);
        assert!(out.command.starts_with("cd '/a' && { s='api'; n=1;"), "got: {}", out.command);
        assert_eq!(out.session.unwrap().mode, MultiplexMode::AlwaysNew);
    }

    #[test]
    fn subsystem_from_windows_uses_bridge_cd() {
        let out = run(
            &task("api", "/mnt/c/Users/Name/Proj"),
            &profile(ShellKind::PosixSubsystem),
            HostClassification::WindowsBridging,
        );
        assert_eq!(out.command, r#"wsl.exe --cd "C:\Users\Name\Proj""#);
        assert_eq!(out.shell, Some(ShellOverride::new("cmd.exe", &["/d", "/c"])));
    }

    #[test]
    fn subsystem_from_windows_with_multiplexer_runs_bash() {
        let p = Profile {
            tmux: tmux(None),
            ..profile(ShellKind::PosixSubsystem)
        };
        let out = run(&task("my project", r"C:\src\p"), &p, HostClassification::WindowsNative);
        assert_eq!(
            out.command,
            "wsl.exe -e bash -c \"cd '/mnt/c/src/p' && tmux new-session -A -s 'my_project'\""
        );
    }

    #[test]
    fn raw_bridge_always_wraps_full_session_command() {
        let out = run(
            &task("api", r"D:\work"),
            &profile(ShellKind::PosixSubsystemRawBridge),
            HostClassification::WindowsBridging,
        );
        assert_eq!(
            out.command,
            "wsl.exe -e bash -c \"cd '/mnt/d/work' && exec bash\""
        );
    }

    #[test]
    fn subsystem_inside_subsystem_runs_directly() {
        let out = run(
            &task("api", r"C:\src\api"),
            &profile(ShellKind::PosixSubsystem),
            HostClassification::HostedInSubsystem,
        );
        assert_eq!(out.command, "cd '/mnt/c/src/api' && exec bash");
        assert_eq!(out.shell, None);
    }

    #[test]
    fn powershell_and_cmd_on_windows() {
        let p = Profile {
            post_commands: Some(vec!["git status".into()]),
            ..profile(ShellKind::WindowsPowershell)
        };
        let out = run(&task("api", "/mnt/c/it's"), &p, HostClassification::WindowsNative);
        assert_eq!(out.command, r"Set-Location 'C:\it''s'; git status");
        assert_eq!(out.shell.unwrap().executable, "powershell.exe");

        let p = Profile {
            post_commands: Some(vec!["dir".into()]),
            ..profile(ShellKind::WindowsCmd)
        };
        let out = run(&task("api", "/mnt/c/x y"), &p, HostClassification::WindowsNative);
        assert_eq!(out.command, r#"cd /d "C:\x y" && dir"#);
        assert_eq!(out.shell, Some(ShellOverride::new("cmd.exe", &["/d", "/k"])));
    }

    #[test]
    fn host_default_is_minimal_cd_in_host_dialect() {
        let p = Profile {
            tmux: tmux(None),
            post_commands: Some(vec!["ls".into()]),
            ..profile(ShellKind::HostDefault)
        };
        let posix = run(&task("api", r"C:\src"), &p, HostClassification::NativePosix);
        assert_eq!(posix.command, "cd '/mnt/c/src'");
        assert_eq!(posix.shell, None);
        assert_eq!(posix.session, None);
        let windows = run(&task("api", "/mnt/c/src"), &p, HostClassification::WindowsBridging);
        assert_eq!(windows.command, r"cd 'C:\src'");
    }

    #[test]
    fn custom_shell_uses_profile_executable() {
        let p = Profile {
            custom_executable: Some("/usr/local/bin/fish".into()),
            custom_args: Some(vec!["-l".into(), "-c".into()]),
            ..profile(ShellKind::Custom)
        };
        let out = run(&task("api", "/srv/api"), &p, HostClassification::NativePosix);
        assert_eq!(out.command, "cd '/srv/api' && exec bash");
        assert_eq!(
            out.shell,
            Some(ShellOverride::new("/usr/local/bin/fish", &["-l", "-c"]))
        );
    }

    #[test]
    fn unusable_kinds_fall_back_to_host_default() {
        let missing_exe = profile(ShellKind::Custom);
        assert_eq!(
            effective_shell_kind(&missing_exe, HostClassification::NativePosix),
            ShellKind::NativeBash
        );
        assert_eq!(
            effective_shell_kind(&profile(ShellKind::Unknown), HostClassification::WindowsNative),
            ShellKind::PosixSubsystem
        );
        assert_eq!(
            effective_shell_kind(&profile(ShellKind::WindowsCmd), HostClassification::NativePosix),
            ShellKind::NativeBash
        );
        assert_eq!(
            effective_shell_kind(&profile(ShellKind::NativeZsh), HostClassification::WindowsBridging),
            ShellKind::PosixSubsystem
        );
        let out = run(
            &task("api", "/srv/api"),
            &profile(ShellKind::Unknown),
            HostClassification::NativePosix,
        );
        assert_eq!(out.command, "cd '/srv/api' && exec bash");
        assert_eq!(out.shell_kind, ShellKind::NativeBash);
    }

    #[test]
    fn env_and_colors_pass_through() {
        let p = Profile {
            env: Some(BTreeMap::from([("RUST_LOG".to_string(), "debug".to_string())])),
            colors: Some(ColorPair {
                foreground: Some("green".into()),
                background: None,
            }),
            ..profile(ShellKind::NativeBash)
        };
        let out = run(&task("", "/srv/billing/"), &p, HostClassification::NativePosix);
        assert_eq!(out.env["RUST_LOG"], "debug");
        assert_eq!(out.colors.unwrap().foreground.as_deref(), Some("green"));
        assert_eq!(out.label, "billing");
    }

    #[test]
    fn synthesize_task_resolves_through_catalog() {
        let catalog = ProfileCatalog::default();
        let bridge = Bridge::default();
        let t = Task {
            profile_id: Some("native-bash-tmux".into()),
            ..task("claude code", "/srv/cc")
        };
        let out = synthesize_task(
            &t,
            &catalog,
            SynthContext {
                host: HostClassification::NativePosix,
                bridge: &bridge,
            },
        );
        assert_eq!(out.command, "cd '/srv/cc' && tmux new-session -A -s 'claude_code'");
    }
}
