//! CLI argument parsing via clap.

use clap::{Parser, Subcommand, ValueEnum};

use launchdeck::host::HostClassification;
use launchdeck::mux::MultiplexerKind;

use crate::build_info::HELP_BUILD_METADATA;

/// Launch terminal tasks across Windows, its POSIX subsystem, and native hosts.
#[derive(Debug, Parser)]
#[command(name = "launchdeck", version, after_help = HELP_BUILD_METADATA)]
pub struct Args {
    /// Path to config file (default: ./launchdeck.toml or
    /// ~/.config/launchdeck/launchdeck.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Host classification override (hosted-in-subsystem, windows-bridging,
    /// windows-native, native-posix).
    #[arg(long = "host", global = true, value_parser = parse_host)]
    pub host: Option<HostClassification>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the configured task tree.
    Tasks,
    /// Print the launch command for one task.
    Command {
        /// Task id.
        id: String,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print launch commands for every task.
    Commands {
        #[arg(long)]
        json: bool,
    },
    /// List live multiplexer sessions.
    Sessions {
        /// Only this multiplexer (default: both).
        #[arg(long, value_parser = parse_kind)]
        kind: Option<MultiplexerKind>,
        /// Only sessions no configured task would create or attach.
        #[arg(long)]
        untracked: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the command that attaches to a session.
    Attach {
        session: String,
        #[arg(long, value_parser = parse_kind, default_value = "tmux")]
        kind: MultiplexerKind,
    },
    /// Print the command that kills a session.
    Kill {
        session: String,
        #[arg(long, value_parser = parse_kind, default_value = "tmux")]
        kind: MultiplexerKind,
        /// Hard delete (zellij keeps exited sessions around otherwise).
        #[arg(long)]
        delete: bool,
    },
    /// Convert or quote a path.
    Path {
        #[arg(value_enum)]
        op: PathOp,
        path: String,
        /// Shell kind for `escape` (for example native-bash, windows-cmd).
        #[arg(long, default_value = "native-bash")]
        shell: String,
    },
    /// Write the default config file.
    Init {
        /// Replace an existing file, keeping a timestamped backup.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathOp {
    /// Convert a Windows drive path to `/mnt/<drive>/...`.
    Posix,
    /// Convert a POSIX mount or share path to a drive path.
    Windows,
    /// Quote for a shell kind.
    Escape,
    /// Folder display name.
    Name,
}

fn parse_host(raw: &str) -> Result<HostClassification, String> {
    raw.parse()
}

fn parse_kind(raw: &str) -> Result<MultiplexerKind, String> {
    raw.parse()
}
