//! Live-session reconciliation against the declared task tree.

use std::collections::BTreeSet;

use crate::host::HostClassification;
use crate::mux::{MultiplexerKind, Session};
use crate::profile::{MultiplexMode, ProfileCatalog};
use crate::synth::{effective_session_name, session_matches};
use crate::tree::{flatten_tasks, Node};

/// A session name some task would enter, with the mode it enters it in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrackedName {
    pub name: String,
    pub mode: MultiplexMode,
}

/// Names of `kind` sessions that tasks in `nodes` would create or attach.
///
/// Only tasks whose resolved profile explicitly enables `kind` with a mode
/// other than `none` contribute.
pub fn tracked_names(
    nodes: &[Node],
    catalog: &ProfileCatalog,
    host: HostClassification,
    kind: MultiplexerKind,
) -> Vec<TrackedName> {
    let mut names = BTreeSet::new();
    for task in flatten_tasks(nodes) {
        let profile = catalog.resolved_for(task, host);
        let Some(config) = profile.multiplexer(kind).filter(|cfg| cfg.is_enabled()) else {
            continue;
        };
        let mode = config.effective_mode();
        if mode == MultiplexMode::None {
            continue;
        }
        names.insert(TrackedName {
            name: effective_session_name(task, config),
            mode,
        });
    }
    names.into_iter().collect()
}

/// Live sessions of `kind` that no task in `nodes` accounts for.
///
/// Comparison is ASCII case-insensitive. Sessions of other kinds in `live`
/// are ignored.
pub fn untracked(
    nodes: &[Node],
    catalog: &ProfileCatalog,
    host: HostClassification,
    live: &[Session],
    kind: MultiplexerKind,
) -> Vec<Session> {
    let tracked = tracked_names(nodes, catalog, host, kind);
    live.iter()
        .filter(|session| session.kind == kind)
        .filter(|session| {
            !tracked
                .iter()
                .any(|t| session_matches(&t.name, &session.name, t.mode))
        })
        .cloned()
        .collect()
}
