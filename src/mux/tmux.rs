//! tmux adapter.
//!
//! Listing uses a fixed tab-separated format, one session per line:
//! `name \t path \t windows \t attached \t created`.

use async_trait::async_trait;

use crate::path_dialect::posix_quote;

use super::{list_output, probe_binary, AdapterContext, Multiplexer, MultiplexerKind, Session};

/// `-F` format passed to `tmux list-sessions`.
pub const LIST_FORMAT: &str =
    "#{session_name}\t#{session_path}\t#{session_windows}\t#{session_attached}\t#{session_created}";

pub(crate) fn attach_fragment(session: &str) -> String {
    format!("tmux attach-session -t {}", posix_quote(session))
}

pub(crate) fn create_fragment(session: &str) -> String {
    format!("tmux new-session -s {}", posix_quote(session))
}

pub(crate) fn attach_or_create_fragment(session: &str) -> String {
    format!("tmux new-session -A -s {}", posix_quote(session))
}

pub(crate) fn kill_fragment(session: &str) -> String {
    format!("tmux kill-session -t {}", posix_quote(session))
}

pub(crate) fn always_new_fragment(base: &str) -> String {
    let base_q = posix_quote(base);
    format!(
        "{{ s={base_q}; n=1; while tmux has-session -t \"=$s\" 2>/dev/null; do n=$((n+1)); s={base_q}-$n; done; tmux new-session -s \"$s\"; }}"
    )
}

/// Parse `tmux list-sessions -F LIST_FORMAT` output.
///
/// Fields are split strictly on tab and kept verbatim. Empty name, path, and
/// window fields fall back to `"unnamed"`, `"~"`, and `1`. Only zero-length
/// lines are skipped; a line of bare tabs is an unnamed session.
pub fn parse_list_output(output: &str) -> Vec<Session> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Session {
    let mut fields = line.split('\t');
    let mut next = || fields.next().unwrap_or_default();
    let name = next();
    let path = next();
    let windows = next();
    let attached = next();
    let created = next();

    Session {
        kind: MultiplexerKind::Tmux,
        name: non_empty_or(name, "unnamed"),
        working_directory: Some(non_empty_or(path, "~")),
        window_count: Some(windows.parse().unwrap_or(1)),
        attached: Some(attached == "1"),
        created_at: created.parse().ok(),
        exited: false,
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// tmux implementation of [`Multiplexer`].
#[derive(Debug, Clone)]
pub struct TmuxAdapter {
    ctx: AdapterContext,
}

impl TmuxAdapter {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Multiplexer for TmuxAdapter {
    fn kind(&self) -> MultiplexerKind {
        MultiplexerKind::Tmux
    }

    async fn is_available(&self) -> bool {
        probe_binary(&self.ctx, "tmux").await
    }

    async fn list_sessions(&self) -> Vec<Session> {
        let args = ["list-sessions".to_string(), "-F".to_string(), LIST_FORMAT.to_string()];
        list_output(&self.ctx, "tmux", &args)
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Bridge;
    use crate::host::HostClassification;

    #[test]
    fn parses_full_line() {
        let sessions = parse_list_output("web\t/home/u/web\t2\t1\t1700000000\n");
        assert_eq!(
            sessions,
            vec![Session {
                kind: MultiplexerKind::Tmux,
                name: "web".into(),
                working_directory: Some("/home/u/web".into()),
                window_count: Some(2),
                attached: Some(true),
                created_at: Some(1_700_000_000),
                exited: false,
            }]
        );
    }

    #[test]
    fn blank_fields_take_defaults() {
        let sessions = parse_list_output("\t\t\t0\t\nscratch\t/tmp\tx\t\tbad\n");
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].name, "unnamed");
        assert_eq!(sessions[0].working_directory.as_deref(), Some("~"));
        assert_eq!(sessions[0].window_count, Some(1));
        assert_eq!(sessions[0].attached, Some(false));
        assert_eq!(sessions[0].created_at, None);
        assert_eq!(sessions[1].window_count, Some(1));
        assert_eq!(sessions[1].attached, Some(false));
    }

    #[test]
    fn path_with_spaces_survives_tab_split() {
        let sessions = parse_list_output("docs\t/home/u/my docs\t1\t0\t1\r\n");
        assert_eq!(sessions[0].working_directory.as_deref(), Some("/home/u/my docs"));
        assert_eq!(sessions[0].created_at, Some(1));
    }

    #[test]
    fn empty_output_yields_no_sessions() {
        assert!(parse_list_output("").is_empty());
        assert!(parse_list_output("\n\r\n").is_empty());
    }

    #[test]
    fn fields_are_not_trimmed() {
        let sessions = parse_list_output("notes\t/home/u/notes \t3\t1\t5\n");
        assert_eq!(sessions[0].working_directory.as_deref(), Some("/home/u/notes "));
        assert_eq!(sessions[0].window_count, Some(3));
    }

    #[test]
    fn tab_only_line_is_an_unnamed_session() {
        let sessions = parse_list_output("\t\t\t\t\n");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].name, "unnamed");
        assert_eq!(sessions[0].working_directory.as_deref(), Some("~"));
        assert_eq!(sessions[0].window_count, Some(1));
    }

    #[test]
    fn command_builders_quote_names() {
        assert_eq!(attach_or_create_fragment("my_project"), "tmux new-session -A -s 'my_project'");
        assert_eq!(attach_fragment("a"), "tmux attach-session -t 'a'");
        assert_eq!(create_fragment("a"), "tmux new-session -s 'a'");
        assert_eq!(kill_fragment("a"), "tmux kill-session -t 'a'");
    }

    #[test]
    fn always_new_numbers_until_free() {
        let fragment = always_new_fragment("api");
        assert!(fragment.starts_with("{ s='api'; n=1;"), "got: {fragment}");
        assert!(fragment.contains("tmux has-session -t \"=$s\""));
        assert!(fragment.contains("s='api'-$n"));
        assert!(fragment.ends_with("tmux new-session -s \"$s\"; }"));
    }

    #[test]
    fn adapter_wraps_commands_for_windows_hosts() {
        let adapter = TmuxAdapter::new(AdapterContext::new(
            HostClassification::WindowsBridging,
            Bridge::default(),
        ));
        assert_eq!(
            adapter.kill_command("api"),
            "wsl.exe -e bash -c \"tmux kill-session -t 'api'\""
        );
        assert_eq!(adapter.delete_command("api"), None);

        let local = TmuxAdapter::new(AdapterContext::new(
            HostClassification::HostedInSubsystem,
            Bridge::default(),
        ));
        assert_eq!(local.attach_command("api"), "tmux attach-session -t 'api'");
    }
}
