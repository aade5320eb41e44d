//! Fixtures shared by the unit tests: scratch directories, tree nodes, and
//! live session lists.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::mux::{MultiplexerKind, Session};
use crate::tree::{Folder, Node, Task};

static NEXT_DIR: AtomicU64 = AtomicU64::new(0);

/// Scratch directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TestTempDir {
    root: PathBuf,
}

impl TestTempDir {
    pub fn new(label: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "launchdeck-{label}-{}-{}",
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).expect("create scratch dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `text` to `name` under the root; parents are created.
    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let target = self.root.join(name);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).expect("create scratch subdir");
        }
        fs::write(&target, text).expect("write scratch file");
        target
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

/// Task node with an optional profile reference.
pub fn task_node(id: &str, name: &str, path: &str, profile_id: Option<&str>) -> Node {
    Node::Task(Task {
        id: id.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        profile_id: profile_id.map(str::to_string),
        ..Default::default()
    })
}

/// Expanded folder node holding `children`.
pub fn folder_node(id: &str, name: &str, children: Vec<Node>) -> Node {
    Node::Folder(Folder {
        id: id.to_string(),
        name: name.to_string(),
        children,
        expanded: true,
    })
}

/// Name-only live sessions of one kind.
pub fn live_sessions(kind: MultiplexerKind, names: &[&str]) -> Vec<Session> {
    names
        .iter()
        .map(|name| Session::named(kind, *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::flatten_tasks;

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let root;
        {
            let scratch = TestTempDir::new("scratch");
            let file = scratch.write("a/b/launchdeck.toml", "[launch]\n");
            assert_eq!(fs::read_to_string(file).unwrap(), "[launch]\n");
            root = scratch.path().to_path_buf();
        }
        assert!(!root.exists());
    }

    #[test]
    fn node_builders_nest() {
        let tree = vec![folder_node(
            "f",
            "Work",
            vec![task_node("a", "api", "/srv/api", Some("native-bash"))],
        )];
        let tasks = flatten_tasks(&tree);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].profile_id.as_deref(), Some("native-bash"));
        assert_eq!(live_sessions(MultiplexerKind::Zellij, &["a", "b"]).len(), 2);
    }
}
