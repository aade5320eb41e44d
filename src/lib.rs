//! launchdeck: turn a tree of terminal tasks into launch commands.
//!
//! Given a declared task, a shell profile, and a host classification, the
//! crate synthesizes the exact command line an executor should run. It
//! converts paths between the Windows drive dialect and the POSIX subsystem
//! mount dialect, builds tmux and zellij session commands, and reconciles
//! live multiplexer sessions against the declared tasks.
//!
//! # Quick start
//!
//! ```
//! use launchdeck::bridge::Bridge;
//! use launchdeck::host::HostClassification;
//! use launchdeck::profile::ProfileCatalog;
//! use launchdeck::synth::{synthesize_task, SynthContext};
//! use launchdeck::tree::Task;
//!
//! let task = Task {
//!     id: "api".into(),
//!     name: "my project".into(),
//!     path: r"C:\src\api".into(),
//!     profile_id: Some("native-bash-tmux".into()),
//!     ..Default::default()
//! };
//! let bridge = Bridge::default();
//! let launch = synthesize_task(
//!     &task,
//!     &ProfileCatalog::default(),
//!     SynthContext { host: HostClassification::NativePosix, bridge: &bridge },
//! );
//! assert_eq!(launch.command, "cd '/mnt/c/src/api' && tmux new-session -A -s 'my_project'");
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod mux;
pub mod path_dialect;
pub mod profile;
pub mod reconcile;
pub mod render;
pub mod synth;
#[cfg(test)]
pub mod testsupport;
pub mod tree;
