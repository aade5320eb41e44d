//! Subsystem bridge invocation forms.
//!
//! From a Windows host every POSIX-side command goes through the bridge
//! executable, either as a shell string (`-e bash -c "..."`) for the executor
//! or as an argv (`-e <program> <args...>`) for direct subprocess calls.

use serde::{Deserialize, Serialize};

/// Default bridge executable name.
pub const DEFAULT_BRIDGE_EXECUTABLE: &str = "wsl.exe";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Bridge {
    pub executable: String,
    /// Target distro; the bridge's own default when unset.
    pub distro: Option<String>,
}

impl Default for Bridge {
    fn default() -> Self {
        Self {
            executable: DEFAULT_BRIDGE_EXECUTABLE.to_string(),
            distro: None,
        }
    }
}

impl Bridge {
    /// Leading bridge words: the executable plus an optional `-d <distro>`.
    pub fn prefix_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(distro) = self.distro.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            args.push("-d".to_string());
            args.push(distro.to_string());
        }
        args
    }

    /// Bridge prefix as it appears in a console-shell command line.
    pub fn command_prefix(&self) -> String {
        let mut words = vec![quote_if_needed(&self.executable)];
        words.extend(self.prefix_args().iter().map(|arg| quote_if_needed(arg)));
        words.join(" ")
    }

    /// Wrap a POSIX command string so it runs in the subsystem's bash.
    pub fn wrap_shell(&self, posix_command: &str) -> String {
        format!(
            "{} -e bash -c \"{}\"",
            self.command_prefix(),
            posix_command.replace('"', "\\\"")
        )
    }

    /// Open an interactive subsystem shell in a Windows-dialect directory.
    pub fn cd_into(&self, windows_path: &str) -> String {
        format!(
            "{} --cd \"{}\"",
            self.command_prefix(),
            windows_path.replace('"', "\"\"")
        )
    }

    /// Argv that runs `program args...` inside the subsystem.
    pub fn argv(&self, program: &str, args: &[String]) -> (String, Vec<String>) {
        let mut full = self.prefix_args();
        full.push("-e".to_string());
        full.push(program.to_string());
        full.extend(args.iter().cloned());
        (self.executable.clone(), full)
    }
}

fn quote_if_needed(word: &str) -> String {
    if word.contains(char::is_whitespace) {
        format!("\"{word}\"")
    } else {
        word.to_string()
    }
}
