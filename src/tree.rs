//! Path addressing over the task forest.
//!
//! Lookups never fail loudly: an identifier that does not resolve yields an
//! empty list or `None`. Mutating operations are pure; they return a new
//! forest rebuilt only along the addressed path, leaving every unrelated
//! subtree equal to its input.

use crate::task::{Task, TaskId, TaskPath};

/// Child list addressed by the full path (the root list for an empty path).
pub fn resolve_list<'a>(forest: &'a [Task], path: &[TaskId]) -> &'a [Task] {
    let mut list = forest;
    for id in path {
        match list.iter().find(|t| t.id == *id) {
            Some(t) => list = &t.subtasks,
            None => return &[],
        }
    }
    list
}

/// The node addressed by the full path, or `None` if any step fails.
pub fn resolve_node<'a>(forest: &'a [Task], path: &[TaskId]) -> Option<&'a Task> {
    let (first, rest) = path.split_first()?;
    let node = forest.iter().find(|t| t.id == *first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        resolve_node(&node.subtasks, rest)
    }
}

/// Applies `f` to the addressed node, rebuilding only along the path. An
/// unresolvable path returns the forest unchanged.
pub fn update_at(forest: &[Task], path: &[TaskId], f: impl FnOnce(&mut Task)) -> Vec<Task> {
    let mut out = forest.to_vec();
    let Some((first, rest)) = path.split_first() else {
        return out;
    };
    if let Some(node) = out.iter_mut().find(|t| t.id == *first) {
        if rest.is_empty() {
            f(node);
        } else {
            node.subtasks = update_at(&node.subtasks, rest, f);
        }
    }
    out
}

/// Appends `task` to the child list addressed by `parent_path` (the root list
/// for an empty path). Sibling order is significant: append keeps the new
/// task last, i.e. clockwise-most.
pub fn insert_at(forest: &[Task], parent_path: &[TaskId], task: Task) -> Vec<Task> {
    if parent_path.is_empty() {
        let mut out = forest.to_vec();
        out.push(task);
        return out;
    }
    update_at(forest, parent_path, |parent| parent.subtasks.push(task))
}

/// Removes the addressed node and its whole subtree.
pub fn delete_at(forest: &[Task], path: &[TaskId]) -> Vec<Task> {
    match path {
        [] => forest.to_vec(),
        [id] => forest.iter().filter(|t| t.id != *id).cloned().collect(),
        [id, rest @ ..] => forest
            .iter()
            .map(|t| {
                if t.id == *id {
                    let mut t = t.clone();
                    t.subtasks = delete_at(&t.subtasks, rest);
                    t
                } else {
                    t.clone()
                }
            })
            .collect(),
    }
}

/// Deepest still-resolving prefix of `path`. Callers run this after any
/// removal before handing the selection back to the engine.
pub fn truncate_to_valid(forest: &[Task], path: &TaskPath) -> TaskPath {
    let mut out = Vec::new();
    let mut list = forest;
    for id in path.ids() {
        match list.iter().find(|t| t.id == *id) {
            Some(t) => {
                out.push(*id);
                list = &t.subtasks;
            }
            None => break,
        }
    }
    TaskPath(out)
}
