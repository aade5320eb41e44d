//! Declared task/folder forest.
//!
//! The forest is a plain value owned by the caller. Helpers here read it or
//! return a rearranged copy; nothing mutates the caller's tree in place.

use serde::{Deserialize, Serialize};

use crate::path_dialect::folder_display_name;
use crate::profile::ProfileOverrides;

/// Leaf launch definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Stored in whichever dialect the user entered; converted only when
    /// a command is synthesized.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ProfileOverrides>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Task {
    /// Name shown to users; falls back to the last path segment when blank.
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            folder_display_name(&self.path)
        } else {
            trimmed.to_string()
        }
    }
}

/// Ordered container of tasks and folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub children: Vec<Node>,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Task(Task),
    Folder(Folder),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Task(task) => &task.id,
            Node::Folder(folder) => &folder.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Task(task) => &task.name,
            Node::Folder(folder) => &folder.name,
        }
    }
}

/// All tasks in depth-first declaration order.
pub fn flatten_tasks(nodes: &[Node]) -> Vec<&Task> {
    let mut out = Vec::new();
    collect_tasks(nodes, &mut out);
    out
}

fn collect_tasks<'a>(nodes: &'a [Node], out: &mut Vec<&'a Task>) {
    for node in nodes {
        match node {
            Node::Task(task) => out.push(task),
            Node::Folder(folder) => collect_tasks(&folder.children, out),
        }
    }
}

/// Every node paired with its nesting depth, depth-first.
pub fn walk(nodes: &[Node]) -> Vec<(usize, &Node)> {
    fn visit<'a>(nodes: &'a [Node], depth: usize, out: &mut Vec<(usize, &'a Node)>) {
        for node in nodes {
            out.push((depth, node));
            if let Node::Folder(folder) = node {
                visit(&folder.children, depth + 1, out);
            }
        }
    }
    let mut out = Vec::new();
    visit(nodes, 0, &mut out);
    out
}

/// Find any node by id.
pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Folder(folder) = node {
            if let Some(found) = find_node(&folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Find a task by id.
pub fn find_task<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Task> {
    match find_node(nodes, id)? {
        Node::Task(task) => Some(task),
        Node::Folder(_) => None,
    }
}

/// Return a copy of `nodes` with node `id` moved into folder `target`
/// (`None` for the root) at `index` (clamped; `None` appends).
///
/// Returns `None` when `id` or `target` does not exist, when `target` is not
/// a folder, or when the move would place a folder inside itself.
pub fn move_node(
    nodes: &[Node],
    id: &str,
    target: Option<&str>,
    index: Option<usize>,
) -> Option<Vec<Node>> {
    let moving = find_node(nodes, id)?;
    if let Some(target_id) = target {
        if find_node(std::slice::from_ref(moving), target_id).is_some() {
            return None;
        }
        if !matches!(find_node(nodes, target_id)?, Node::Folder(_)) {
            return None;
        }
    }

    let mut copy = nodes.to_vec();
    let detached = detach(&mut copy, id)?;
    let siblings = match target {
        None => &mut copy,
        Some(target_id) => folder_children_mut(&mut copy, target_id)?,
    };
    let at = index.unwrap_or(siblings.len()).min(siblings.len());
    siblings.insert(at, detached);
    Some(copy)
}

fn detach(nodes: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(pos) = nodes.iter().position(|node| node.id() == id) {
        return Some(nodes.remove(pos));
    }
    nodes.iter_mut().find_map(|node| match node {
        Node::Folder(folder) => detach(&mut folder.children, id),
        Node::Task(_) => None,
    })
}

fn folder_children_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Vec<Node>> {
    for node in nodes.iter_mut() {
        if let Node::Folder(folder) = node {
            if folder.id == id {
                return Some(&mut folder.children);
            }
            if let Some(found) = folder_children_mut(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}
