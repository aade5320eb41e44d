//! zellij adapter.
//!
//! `zellij list-sessions` prints colored free text such as
//! `api [Created 3m ago] (EXITED - attach to resurrect)`, so lines are
//! stripped of escapes and only the leading token is kept as the name.
//! zellij has no combined attach-or-create primitive; it is composed with a
//! shell `||`.

use async_trait::async_trait;

use crate::path_dialect::posix_quote;

use super::{list_output, probe_binary, AdapterContext, Multiplexer, MultiplexerKind, Session};

pub(crate) fn attach_fragment(session: &str) -> String {
    format!("zellij attach {}", posix_quote(session))
}

pub(crate) fn create_fragment(session: &str) -> String {
    format!("zellij --session {}", posix_quote(session))
}

pub(crate) fn attach_or_create_fragment(session: &str) -> String {
    format!(
        "zellij attach {} 2>/dev/null || {}",
        posix_quote(session),
        create_fragment(session)
    )
}

pub(crate) fn kill_fragment(session: &str) -> String {
    format!("zellij kill-session {}", posix_quote(session))
}

pub(crate) fn delete_fragment(session: &str) -> String {
    format!("zellij delete-session {} --force", posix_quote(session))
}

pub(crate) fn always_new_fragment(base: &str) -> String {
    let base_q = posix_quote(base);
    format!(
        "{{ s={base_q}; n=1; while zellij list-sessions --short 2>/dev/null | grep -Fxq -- \"$s\"; do n=$((n+1)); s={base_q}-$n; done; zellij --session \"$s\"; }}"
    )
}

/// Parse `zellij list-sessions` output into name-only session records.
pub fn parse_list_output(output: &str) -> Vec<Session> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Session> {
    let plain = strip_ansi_escapes::strip_str(line);
    let trimmed = plain.trim();
    let name: String = trimmed
        .chars()
        .take_while(|ch| !ch.is_whitespace() && *ch != '(')
        .collect();
    if name.is_empty() {
        return None;
    }
    let mut session = Session::named(MultiplexerKind::Zellij, name);
    session.exited = trimmed.contains("EXITED");
    Some(session)
}

/// zellij implementation of [`Multiplexer`].
#[derive(Debug, Clone)]
pub struct ZellijAdapter {
    ctx: AdapterContext,
}

impl ZellijAdapter {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Multiplexer for ZellijAdapter {
    fn kind(&self) -> MultiplexerKind {
        MultiplexerKind::Zellij
    }

    async fn is_available(&self) -> bool {
        probe_binary(&self.ctx, "zellij").await
    }

    async fn list_sessions(&self) -> Vec<Session> {
        // zellij exits non-zero with a notice on stderr when nothing is running.
        list_output(&self.ctx, "zellij", &["list-sessions".to_string()])
            .await
            .map(|out| parse_list_output(&out))
            .unwrap_or_default()
    }

    fn attach_command(&self, session: &str) -> String {
        self.ctx.host_command(attach_fragment(session))
    }

    fn create_command(&self, session: &str) -> String {
        self.ctx.host_command(create_fragment(session))
    }

    fn attach_or_create_command(&self, session: &str) -> String {
        self.ctx.host_command(attach_or_create_fragment(session))
    }

    fn kill_command(&self, session: &str) -> String {
        self.ctx.host_command(kill_fragment(session))
    }

    fn delete_command(&self, session: &str) -> Option<String> {
        Some(self.ctx.host_command(delete_fragment(session)))
    }
}
