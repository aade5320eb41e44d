//! Session naming shared by command synthesis and reconciliation.
//!
//! Both sides must derive the same name for a task, so every comparison and
//! every generated multiplexer command goes through these helpers.

use crate::profile::{MultiplexMode, MultiplexerConfig};
use crate::tree::Task;

/// Longest session name ever generated.
pub const MAX_SESSION_NAME_LEN: usize = 50;

/// Replace everything outside `[A-Za-z0-9_-]` with `_` and cap the length.
pub fn sanitize_session_name(raw: &str) -> String {
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_SESSION_NAME_LEN)
        .collect()
}

/// The sanitized session name a task uses for one multiplexer.
///
/// An explicit non-blank `session_name` wins over the task's display name.
pub fn effective_session_name(task: &Task, config: &MultiplexerConfig) -> String {
    let raw = config
        .session_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| task.display_name());
    sanitize_session_name(&raw)
}

/// Whether a live session name belongs to a tracked base name.
///
/// Comparison is ASCII case-insensitive. For `always-new` tasks the numbered
/// siblings (`<base>-2`, `<base>-3`, ...) produced at launch also match.
pub fn session_matches(base: &str, live: &str, mode: MultiplexMode) -> bool {
    if live.eq_ignore_ascii_case(base) {
        return true;
    }
    if mode != MultiplexMode::AlwaysNew || live.len() <= base.len() + 1 {
        return false;
    }
    let Some(head) = live.get(..base.len()) else {
        return false;
    };
    let Some(suffix) = live[base.len()..].strip_prefix('-') else {
        return false;
    };
    head.eq_ignore_ascii_case(base) && suffix.bytes().all(|b| b.is_ascii_digit())
}
