//! Terminal output for the CLI.
//!
//! Data rows (task lists, commands, sessions) go to stdout so they can be
//! piped. Status, warnings, and errors go to stderr.

use crossterm::style::{Color, Stylize};

use crate::mux::Session;
use crate::synth::LaunchCommand;

const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";
const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }

    /// Print a status line (to stderr).
    pub fn status(&self, msg: &str) {
        if self.color {
            eprintln!("{}", msg.with(Color::DarkGrey));
        } else {
            eprintln!("{msg}");
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if self.color {
            println!("{}", title.with(Color::Cyan).bold());
        } else {
            println!("{title}:");
        }
    }

    /// Print one indented key/value row.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            println!(
                "{INDENT}{} {}",
                format!("{key}:").with(Color::DarkGrey),
                value.with(Color::White)
            );
        } else {
            println!("{INDENT}{key}: {value}");
        }
    }

    /// Print one tree row at `depth`, folders in bold.
    pub fn tree_row(&self, depth: usize, id: &str, label: &str, is_folder: bool, detail: &str) {
        let indent = INDENT.repeat(depth);
        let text = tree_row_text(id, label, is_folder, detail);
        if !self.color {
            println!("{indent}{text}");
        } else if is_folder {
            println!("{indent}{}", text.with(Color::Blue).bold());
        } else {
            println!(
                "{indent}{} {}",
                label.with(Color::Green),
                format!("[{id}] {detail}").trim_end().with(Color::DarkGrey)
            );
        }
    }

    /// Print a synthesized launch command with its shell override.
    pub fn launch_command(&self, launch: &LaunchCommand) {
        self.section(&launch.label);
        self.field("shell kind", launch.shell_kind.as_str());
        if let Some(shell) = &launch.shell {
            let mut words = vec![shell.executable.clone()];
            words.extend(shell.args.iter().cloned());
            self.field("shell", &words.join(" "));
        }
        if let Some(session) = &launch.session {
            self.field(
                "session",
                &format!("{} {} ({})", session.kind, session.name, kebab(&session.mode)),
            );
        }
        for (key, value) in &launch.env {
            self.field("env", &format!("{key}={value}"));
        }
        self.field("command", &launch.command);
    }

    /// Print one live session row.
    pub fn session_row(&self, session: &Session) {
        let text = session_row_text(session);
        if !self.color {
            println!("{text}");
        } else if session.exited {
            println!("{}", text.with(Color::DarkGrey));
        } else if session.attached == Some(true) {
            println!("{}", text.with(Color::Green));
        } else {
            println!("{text}");
        }
    }
}

fn kebab<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

pub(crate) fn tree_row_text(id: &str, label: &str, is_folder: bool, detail: &str) -> String {
    if is_folder {
        format!("{label}/")
    } else {
        format!("{label} [{id}] {detail}").trim_end().to_string()
    }
}

pub(crate) fn session_row_text(session: &Session) -> String {
    let mut parts = vec![format!("{:<7}", session.kind.to_string()), session.name.clone()];
    if let Some(windows) = session.window_count {
        parts.push(format!("{windows} window{}", if windows == 1 { "" } else { "s" }));
    }
    if session.attached == Some(true) {
        parts.push("attached".to_string());
    }
    if session.exited {
        parts.push("exited".to_string());
    }
    if let Some(dir) = &session.working_directory {
        parts.push(dir.clone());
    }
    parts.join("  ")
}
