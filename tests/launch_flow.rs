//! End-to-end flow through the public API: load a config file, synthesize
//! launch commands for its tasks, and reconcile live sessions.
//!
//! The live multiplexer probe at the bottom is `#[ignore]`d; run it with
//! `cargo test --test launch_flow -- --ignored` on a machine with tmux.

use launchdeck::config::load_config;
use launchdeck::host::HostClassification;
use launchdeck::mux::{adapter_for, MultiplexerKind, Session};
use launchdeck::reconcile::untracked;
use launchdeck::synth::{synthesize_task, SynthContext};
use launchdeck::tree::{find_task, flatten_tasks};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const FIXTURE: &str = r#"
[launch]
host = "windows-bridging"
default_profile = "work-zsh"

[bridge]
distro = "Debian"

[[profiles]]
id = "work-zsh"
name = "Work zsh"
shell_kind = "native-zsh"

[profiles.tmux]
enabled = true

[[tree]]
type = "folder"
id = "work"
name = "Work"
expanded = true

[[tree.children]]
type = "task"
id = "api"
name = "my project"
path = 'C:\src\api'
profile_id = "posix-subsystem-tmux"

[[tree.children]]
type = "task"
id = "shell"
name = ""
path = "/mnt/c/Users/me/notes"
profile_id = "posix-subsystem"

[[tree.children]]
type = "task"
id = "ps"
name = "ps"
path = "/mnt/d/tools"
profile_id = "windows-powershell"

[tree.children.overrides]
post_commands = ["Get-ChildItem"]

[[tree]]
type = "task"
id = "scratch-zsh"
name = "Scratch"
path = "/home/me/scratch"
"#;

fn write_fixture(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "launchdeck-it-{name}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create fixture dir");
    let path = dir.join("launchdeck.toml");
    fs::write(&path, FIXTURE).expect("write fixture");
    path
}

#[test]
fn config_file_drives_command_synthesis() {
    let path = write_fixture("synth");
    let config = load_config(Some(path.to_string_lossy().as_ref())).expect("load config");
    let _ = fs::remove_dir_all(path.parent().expect("fixture dir"));

    assert_eq!(config.launch.host, Some(HostClassification::WindowsBridging));
    let host = config.host();
    let catalog = config.catalog();
    let ctx = SynthContext {
        host,
        bridge: &config.bridge,
    };

    let api = find_task(&config.tree, "api").expect("api task");
    let launch = synthesize_task(api, &catalog, ctx);
    assert_eq!(
        launch.command,
        "wsl.exe -d Debian -e bash -c \"cd '/mnt/c/src/api' && tmux new-session -A -s 'my_project'\""
    );
    assert_eq!(launch.session.expect("session").name, "my_project");

    let shell = find_task(&config.tree, "shell").expect("shell task");
    let launch = synthesize_task(shell, &catalog, ctx);
    assert_eq!(launch.label, "notes");
    assert_eq!(launch.command, r#"wsl.exe -d Debian --cd "C:\Users\me\notes""#);

    let ps = find_task(&config.tree, "ps").expect("ps task");
    let launch = synthesize_task(ps, &catalog, ctx);
    assert_eq!(launch.command, r"Set-Location 'D:\tools'; Get-ChildItem");

    // The default profile is native zsh, which cannot run on a Windows host.
    let scratch = find_task(&config.tree, "scratch-zsh").expect("scratch task");
    let launch = synthesize_task(scratch, &catalog, ctx);
    assert_eq!(launch.shell_kind.as_str(), "posix-subsystem");

    let json = serde_json::to_value(
        flatten_tasks(&config.tree)
            .into_iter()
            .map(|task| synthesize_task(task, &catalog, ctx))
            .collect::<Vec<_>>(),
    )
    .expect("serialize commands");
    assert_eq!(json.as_array().map(Vec::len), Some(4));
    assert_eq!(json[0]["session"]["kind"], "tmux");
    assert_eq!(json[0]["session"]["mode"], "attach-or-create");
}

#[test]
fn reconciler_flags_sessions_outside_the_tree() {
    let path = write_fixture("reconcile");
    let config = load_config(Some(path.to_string_lossy().as_ref())).expect("load config");
    let _ = fs::remove_dir_all(path.parent().expect("fixture dir"));

    let live: Vec<Session> = ["My_Project", "Scratch", "build"]
        .into_iter()
        .map(|name| Session::named(MultiplexerKind::Tmux, name))
        .collect();
    let stray = untracked(
        &config.tree,
        &config.catalog(),
        HostClassification::NativePosix,
        &live,
        MultiplexerKind::Tmux,
    );
    let names: Vec<&str> = stray.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["build"]);
}

#[tokio::test]
#[ignore = "needs a local tmux; run explicitly"]
async fn live_tmux_session_is_listed() {
    let ctx = launchdeck::mux::AdapterContext::new(
        HostClassification::NativePosix,
        Default::default(),
    );
    let tmux = adapter_for(MultiplexerKind::Tmux, ctx);
    assert!(tmux.is_available().await, "tmux not on PATH");

    let name = format!("launchdeck-it-{}", std::process::id());
    let status = std::process::Command::new("tmux")
        .args(["new-session", "-d", "-s", &name])
        .status()
        .expect("spawn tmux");
    assert!(status.success());

    let sessions = tmux.list_sessions().await;
    let _ = std::process::Command::new("sh")
        .args(["-c", &tmux.kill_command(&name)])
        .status();
    assert!(sessions.iter().any(|s| s.name == name), "{sessions:?}");
}
