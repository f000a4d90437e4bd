use crate::error::{SunwheelError, SunwheelResult};

/// Identifier unique among siblings; in practice globally unique because ids
/// come from a monotonically increasing counter and are never reused.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub effort: f64, // relative weight, > 0
    pub completed: bool,
    pub subtasks: Vec<Task>,
}

impl Task {
    /// Fresh task with the default name/effort and no children. `ordinal` is
    /// only used to pick a readable default name.
    pub fn new(id: TaskId, ordinal: usize) -> Self {
        Self {
            id,
            name: format!("New Task {ordinal}"),
            description: String::new(),
            effort: 100.0,
            completed: false,
            subtasks: Vec::new(),
        }
    }
}

/// Root-to-node identifier sequence. Empty means "nothing selected, top level
/// visible". A path is only meaningful against a forest; see `tree`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TaskPath(pub Vec<TaskId>);

impl TaskPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self(ids.into_iter().map(TaskId).collect())
    }

    pub fn ids(&self) -> &[TaskId] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The selected node's id, if anything is selected.
    pub fn leaf(&self) -> Option<TaskId> {
        self.0.last().copied()
    }

    /// Path to the list containing the selected node.
    pub fn parent(&self) -> TaskPath {
        let mut ids = self.0.clone();
        ids.pop();
        TaskPath(ids)
    }

    pub fn child(&self, id: TaskId) -> TaskPath {
        let mut ids = self.0.clone();
        ids.push(id);
        TaskPath(ids)
    }
}

/// Persisted document layout: `{ "tasks": [ ... ] }`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub tasks: Vec<Task>,
}

impl Document {
    pub fn from_json(s: &str) -> SunwheelResult<Self> {
        serde_json::from_str(s).map_err(|e| SunwheelError::serde(e.to_string()))
    }

    pub fn to_json(&self) -> SunwheelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SunwheelError::serde(e.to_string()))
    }

    /// Boundary check guarding the layout precondition: every task has a
    /// positive finite effort and sibling ids do not collide.
    pub fn validate(&self) -> SunwheelResult<()> {
        validate_list(&self.tasks)
    }
}

fn validate_list(tasks: &[Task]) -> SunwheelResult<()> {
    for (i, task) in tasks.iter().enumerate() {
        if !(task.effort > 0.0 && task.effort.is_finite()) {
            return Err(SunwheelError::validation(format!(
                "task '{}' (id {}) must have finite effort > 0, got {}",
                task.name, task.id.0, task.effort
            )));
        }
        if tasks[..i].iter().any(|t| t.id == task.id) {
            return Err(SunwheelError::validation(format!(
                "duplicate sibling id {}",
                task.id.0
            )));
        }
        validate_list(&task.subtasks)?;
    }
    Ok(())
}

/// Monotonic id source. Seed it from a loaded document so ids are never
/// reused across sessions.
#[derive(Clone, Copy, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn seeded_from(tasks: &[Task]) -> Self {
        fn max_id(tasks: &[Task]) -> u64 {
            tasks
                .iter()
                .map(|t| t.id.0.max(max_id(&t.subtasks)))
                .max()
                .unwrap_or(0)
        }
        Self {
            next: max_id(tasks) + 1,
        }
    }

    pub fn allocate(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u64, effort: f64) -> Task {
        Task {
            id: TaskId(id),
            name: format!("t{id}"),
            description: String::new(),
            effort,
            completed: false,
            subtasks: Vec::new(),
        }
    }

    #[test]
    fn json_roundtrip_preserves_nesting() {
        let doc = Document {
            tasks: vec![Task {
                subtasks: vec![leaf(2, 1.0), leaf(3, 3.0)],
                ..leaf(1, 1.0)
            }],
        };
        let s = doc.to_json().unwrap();
        assert!(s.contains("\"tasks\""));
        assert!(s.contains("\"subtasks\""));
        assert!(s.contains("\"effort\""));
        let de = Document::from_json(&s).unwrap();
        assert_eq!(de, doc);
    }

    #[test]
    fn validate_rejects_non_positive_effort() {
        let doc = Document {
            tasks: vec![Task {
                subtasks: vec![leaf(2, 0.0)],
                ..leaf(1, 1.0)
            }],
        };
        assert!(doc.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_sibling_ids() {
        let doc = Document {
            tasks: vec![leaf(1, 1.0), leaf(1, 2.0)],
        };
        assert!(doc.validate().is_err());
    }

    #[test]
    fn nested_duplicate_ids_on_different_levels_are_fine() {
        // Uniqueness is only required among siblings.
        let doc = Document {
            tasks: vec![Task {
                subtasks: vec![leaf(1, 1.0)],
                ..leaf(1, 1.0)
            }],
        };
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn allocator_seeds_past_deepest_id() {
        let forest = vec![Task {
            subtasks: vec![leaf(7, 1.0)],
            ..leaf(2, 1.0)
        }];
        let mut ids = IdAllocator::seeded_from(&forest);
        assert_eq!(ids.allocate(), TaskId(8));
        assert_eq!(ids.allocate(), TaskId(9));
    }

    #[test]
    fn path_parent_and_leaf() {
        let p = TaskPath::new([1, 3]);
        assert_eq!(p.depth(), 2);
        assert_eq!(p.leaf(), Some(TaskId(3)));
        assert_eq!(p.parent(), TaskPath::new([1]));
        assert_eq!(TaskPath::root().leaf(), None);
        assert_eq!(p.parent().child(TaskId(3)), p);
    }
}
