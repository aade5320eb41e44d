//! Override merging.
//!
//! Scalars and arrays in the override replace the base value. The two
//! multiplexer sub-objects, the color pair, and the env map merge key by key
//! so a task can narrow one nested field without restating its siblings.

use std::collections::BTreeMap;

use super::{ColorPair, MultiplexerConfig, Profile, ProfileOverrides};

/// Merge `overrides` onto `base`, producing the effective profile.
pub fn resolve(base: &Profile, overrides: Option<&ProfileOverrides>) -> Profile {
    let Some(overrides) = overrides else {
        return base.clone();
    };

    Profile {
        id: base.id.clone(),
        name: base.name.clone(),
        builtin: base.builtin,
        shell_kind: overrides.shell_kind.unwrap_or(base.shell_kind),
        custom_executable: overrides
            .custom_executable
            .clone()
            .or_else(|| base.custom_executable.clone()),
        custom_args: overrides
            .custom_args
            .clone()
            .or_else(|| base.custom_args.clone()),
        tmux: merge_option(
            base.tmux.as_ref(),
            overrides.tmux.as_ref(),
            merge_multiplexer,
        ),
        zellij: merge_option(
            base.zellij.as_ref(),
            overrides.zellij.as_ref(),
            merge_multiplexer,
        ),
        colors: merge_option(base.colors.as_ref(), overrides.colors.as_ref(), merge_colors),
        env: merge_option(base.env.as_ref(), overrides.env.as_ref(), merge_env),
        // Command lists replace wholesale; they are never concatenated.
        pre_commands: overrides
            .pre_commands
            .clone()
            .or_else(|| base.pre_commands.clone()),
        post_commands: overrides
            .post_commands
            .clone()
            .or_else(|| base.post_commands.clone()),
    }
}

fn merge_option<T: Clone>(
    base: Option<&T>,
    over: Option<&T>,
    merge: impl Fn(&T, &T) -> T,
) -> Option<T> {
    match (base, over) {
        (Some(base), Some(over)) => Some(merge(base, over)),
        (None, Some(over)) => Some(over.clone()),
        (Some(base), None) => Some(base.clone()),
        (None, None) => None,
    }
}

fn merge_multiplexer(base: &MultiplexerConfig, over: &MultiplexerConfig) -> MultiplexerConfig {
    MultiplexerConfig {
        enabled: over.enabled.or(base.enabled),
        mode: over.mode.or(base.mode),
        session_name: over
            .session_name
            .clone()
            .or_else(|| base.session_name.clone()),
        custom_command: over
            .custom_command
            .clone()
            .or_else(|| base.custom_command.clone()),
    }
}

fn merge_colors(base: &ColorPair, over: &ColorPair) -> ColorPair {
    ColorPair {
        foreground: over.foreground.clone().or_else(|| base.foreground.clone()),
        background: over.background.clone().or_else(|| base.background.clone()),
    }
}

fn merge_env(
    base: &BTreeMap<String, String>,
    over: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = base.clone();
    merged.extend(over.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
