//! Subcommand handlers for the launchdeck CLI.

use std::path::PathBuf;

use launchdeck::config::{initialize_config, Config, ConfigInitResult};
use launchdeck::host::HostClassification;
use launchdeck::mux::{adapter_for, MultiplexerKind, Session};
use launchdeck::path_dialect::{
    escape_for_shell, folder_display_name, to_posix_mount, to_windows_drive,
};
use launchdeck::profile::{ProfileCatalog, ShellKind};
use launchdeck::reconcile::untracked;
use launchdeck::render::Renderer;
use launchdeck::synth::{synthesize_task, LaunchCommand, SynthContext};
use launchdeck::tree::{find_task, flatten_tasks, walk, Node};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Command, PathOp};

/// Everything a handler needs after config and flags are resolved.
pub struct App {
    pub config: Config,
    pub host: HostClassification,
    pub renderer: Renderer,
    /// Explicit `--config` path, reused by `init`.
    pub config_path: Option<String>,
}

impl App {
    fn catalog(&self) -> ProfileCatalog {
        self.config.catalog()
    }

    fn synth_context(&self) -> SynthContext<'_> {
        SynthContext {
            host: self.host,
            bridge: &self.config.bridge,
        }
    }

    pub async fn run(&self, command: Command) -> Result<(), String> {
        match command {
            Command::Tasks => {
                self.list_tasks();
                Ok(())
            }
            Command::Command { id, json } => self.print_command(&id, json),
            Command::Commands { json } => self.print_all_commands(json),
            Command::Sessions {
                kind,
                untracked,
                json,
            } => self.list_sessions(kind, untracked, json).await,
            Command::Attach { session, kind } => {
                let adapter = adapter_for(kind, self.config.adapter_context(self.host));
                println!("{}", adapter.attach_command(&session));
                Ok(())
            }
            Command::Kill {
                session,
                kind,
                delete,
            } => {
                let adapter = adapter_for(kind, self.config.adapter_context(self.host));
                let command = if delete {
                    adapter.delete_command(&session).ok_or_else(|| {
                        format!("{kind} has no hard delete; use `kill` without --delete")
                    })?
                } else {
                    adapter.kill_command(&session)
                };
                println!("{command}");
                Ok(())
            }
            Command::Path { op, path, shell } => {
                println!("{}", path_op(op, &path, &shell)?);
                Ok(())
            }
            Command::Init { force } => self.init(force),
        }
    }

    fn list_tasks(&self) {
        let catalog = self.catalog();
        for (depth, node) in walk(&self.config.tree) {
            match node {
                Node::Folder(folder) => {
                    self.renderer.tree_row(depth, &folder.id, &folder.name, true, "")
                }
                Node::Task(task) => {
                    let profile = catalog.base_for(task, self.host);
                    self.renderer
                        .tree_row(depth, &task.id, &task.display_name(), false, &profile.id);
                }
            }
        }
    }

    fn print_command(&self, id: &str, json: bool) -> Result<(), String> {
        let task = find_task(&self.config.tree, id)
            .ok_or_else(|| format!("no task with id `{id}`"))?;
        let launch = synthesize_task(task, &self.catalog(), self.synth_context());
        if json {
            print_json(&launch)
        } else {
            self.renderer.launch_command(&launch);
            Ok(())
        }
    }

    fn print_all_commands(&self, json: bool) -> Result<(), String> {
        let catalog = self.catalog();
        let commands: Vec<LaunchCommand> = flatten_tasks(&self.config.tree)
            .into_iter()
            .map(|task| synthesize_task(task, &catalog, self.synth_context()))
            .collect();
        if json {
            return print_json(&commands);
        }
        for launch in &commands {
            self.renderer.launch_command(launch);
        }
        Ok(())
    }

    async fn list_sessions(
        &self,
        kind: Option<MultiplexerKind>,
        only_untracked: bool,
        json: bool,
    ) -> Result<(), String> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => MultiplexerKind::ALL.to_vec(),
        };
        let catalog = self.catalog();
        let mut sessions: Vec<Session> = Vec::new();
        for kind in kinds {
            let adapter = adapter_for(kind, self.config.adapter_context(self.host));
            if !adapter.is_available().await {
                debug!(%kind, host = %self.host, "multiplexer not available");
                if !json {
                    self.renderer.status(&format!("{kind}: not available"));
                }
                continue;
            }
            let live = adapter.list_sessions().await;
            if only_untracked {
                sessions.extend(untracked(&self.config.tree, &catalog, self.host, &live, kind));
            } else {
                sessions.extend(live);
            }
        }
        if json {
            return print_json(&sessions);
        }
        for session in &sessions {
            self.renderer.session_row(session);
        }
        Ok(())
    }

    fn init(&self, force: bool) -> Result<(), String> {
        let path = self.config_path.as_deref().map(PathBuf::from);
        let result = initialize_config(path.as_deref(), force).map_err(|e| e.to_string())?;
        match result {
            ConfigInitResult::Created { path } => {
                self.renderer.status(&format!("wrote {}", path.display()));
            }
            ConfigInitResult::AlreadyInitialized { path } => {
                self.renderer.warn(&format!(
                    "{} already exists; pass --force to replace it",
                    path.display()
                ));
            }
            ConfigInitResult::Overwritten { path, backup_path } => {
                self.renderer.status(&format!(
                    "wrote {} (previous file saved as {})",
                    path.display(),
                    backup_path.display()
                ));
            }
        }
        Ok(())
    }
}

fn path_op(op: PathOp, path: &str, shell: &str) -> Result<String, String> {
    Ok(match op {
        PathOp::Posix => to_posix_mount(path),
        PathOp::Windows => to_windows_drive(path),
        PathOp::Escape => escape_for_shell(path, shell.parse::<ShellKind>()?),
        PathOp::Name => folder_display_name(path),
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))?;
    println!("{text}");
    Ok(())
}
