//! Terminal multiplexer adapters.
//!
//! Two tool families share the [`Multiplexer`] contract. Probe and listing
//! calls run a short-lived subprocess under a timeout and collapse every
//! failure to `false` / an empty list: a missing multiplexer is a normal
//! steady state, not an error. Command builders are pure string templates.
//!
//! Each kind exposes its fragments twice: unwrapped (for embedding inside a
//! command that is already running in the subsystem, as synthesis does) and
//! through the adapter, which wraps them in the bridge form when the host
//! needs it.

pub mod process;
pub mod tmux;
pub mod zellij;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::bridge::Bridge;
use crate::host::HostClassification;

pub use tmux::TmuxAdapter;
pub use zellij::ZellijAdapter;

/// Default bound on `which <tool>` probes.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);
/// Default bound on session listing calls.
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Supported multiplexer tool families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiplexerKind {
    Tmux,
    Zellij,
}

impl MultiplexerKind {
    pub const ALL: [MultiplexerKind; 2] = [Self::Tmux, Self::Zellij];

    /// Binary name on `PATH`.
    pub fn binary(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::Zellij => "zellij",
        }
    }

    pub fn attach_fragment(self, session: &str) -> String {
        match self {
            Self::Tmux => tmux::attach_fragment(session),
            Self::Zellij => zellij::attach_fragment(session),
        }
    }

    pub fn create_fragment(self, session: &str) -> String {
        match self {
            Self::Tmux => tmux::create_fragment(session),
            Self::Zellij => zellij::create_fragment(session),
        }
    }

    pub fn attach_or_create_fragment(self, session: &str) -> String {
        match self {
            Self::Tmux => tmux::attach_or_create_fragment(session),
            Self::Zellij => zellij::attach_or_create_fragment(session),
        }
    }

    pub fn kill_fragment(self, session: &str) -> String {
        match self {
            Self::Tmux => tmux::kill_fragment(session),
            Self::Zellij => zellij::kill_fragment(session),
        }
    }

    /// Create `base`, or `base-2`, `base-3`, ... when taken.
    pub fn always_new_fragment(self, base: &str) -> String {
        match self {
            Self::Tmux => tmux::always_new_fragment(base),
            Self::Zellij => zellij::always_new_fragment(base),
        }
    }
}

impl fmt::Display for MultiplexerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for MultiplexerKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tmux" => Ok(Self::Tmux),
            "zellij" => Ok(Self::Zellij),
            other => Err(format!(
                "unknown multiplexer `{other}` (expected tmux or zellij)"
            )),
        }
    }
}

/// One live multiplexer session. Fields a tool cannot report stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub kind: MultiplexerKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached: Option<bool>,
    /// Creation time, epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
    /// Listed but no longer running (resurrectable).
    pub exited: bool,
}

impl Session {
    /// A record carrying only a name.
    pub fn named(kind: MultiplexerKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            working_directory: None,
            window_count: None,
            attached: None,
            created_at: None,
            exited: false,
        }
    }
}

/// How adapters reach the tool and how long they may wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterContext {
    pub host: HostClassification,
    pub bridge: Bridge,
    pub probe_timeout: Duration,
    pub list_timeout: Duration,
}

impl AdapterContext {
    pub fn new(host: HostClassification, bridge: Bridge) -> Self {
        Self {
            host,
            bridge,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            list_timeout: DEFAULT_LIST_TIMEOUT,
        }
    }

    /// Wrap a POSIX command for the current host.
    pub fn host_command(&self, posix_command: String) -> String {
        if self.host.needs_bridge() {
            self.bridge.wrap_shell(&posix_command)
        } else {
            posix_command
        }
    }

    /// Program and argv for running `program args...` on the POSIX side.
    pub fn host_argv(&self, program: &str, args: &[String]) -> (String, Vec<String>) {
        if self.host.needs_bridge() {
            self.bridge.argv(program, args)
        } else {
            (program.to_string(), args.to_vec())
        }
    }
}

/// Capability contract shared by both multiplexer adapters.
#[async_trait]
pub trait Multiplexer: Send + Sync {
    fn kind(&self) -> MultiplexerKind;

    /// Probe for the binary. Never fails; every problem reads as `false`.
    async fn is_available(&self) -> bool;

    /// Live sessions. Never fails; every problem reads as empty.
    async fn list_sessions(&self) -> Vec<Session>;

    fn attach_command(&self, session: &str) -> String;

    fn create_command(&self, session: &str) -> String;

    fn attach_or_create_command(&self, session: &str) -> String;

    fn kill_command(&self, session: &str) -> String;

    /// Hard delete, for tools that keep exited sessions around.
    fn delete_command(&self, _session: &str) -> Option<String> {
        None
    }
}

/// Build the adapter for one multiplexer kind.
pub fn adapter_for(kind: MultiplexerKind, ctx: AdapterContext) -> Box<dyn Multiplexer> {
    match kind {
        MultiplexerKind::Tmux => Box::new(TmuxAdapter::new(ctx)),
        MultiplexerKind::Zellij => Box::new(ZellijAdapter::new(ctx)),
    }
}

/// Shared `which <tool>` probe.
pub(crate) async fn probe_binary(ctx: &AdapterContext, binary: &str) -> bool {
    let (program, args) = ctx.host_argv("which", &[binary.to_string()]);
    match process::run_with_timeout(&program, &args, ctx.probe_timeout).await {
        Ok(output) => {
            let found = output.exit_code == 0 && !output.stdout.trim().is_empty();
            tracing::debug!(binary, found, "multiplexer probe finished");
            found
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!(binary, program = %program, "probe program not installed");
            false
        }
        Err(err) => {
            tracing::debug!(binary, error = %err, "multiplexer probe failed");
            false
        }
    }
}

/// Shared listing call: stdout on success, `None` on any failure.
pub(crate) async fn list_output(
    ctx: &AdapterContext,
    binary: &str,
    args: &[String],
) -> Option<String> {
    let (program, argv) = ctx.host_argv(binary, args);
    match process::run_with_timeout(&program, &argv, ctx.list_timeout).await {
        Ok(output) if output.exit_code == 0 => Some(output.stdout),
        Ok(output) => {
            tracing::debug!(
                binary,
                exit_code = output.exit_code,
                stderr = output.stderr.trim(),
                "session listing exited non-zero"
            );
            None
        }
        Err(err) => {
            tracing::debug!(binary, error = %err, "session listing failed");
            None
        }
    }
}
