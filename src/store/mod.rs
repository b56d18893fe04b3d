//! The in-memory task collection and everything that operates on it.
//!
//! [`TaskStore`] owns the ordered list of records. It is plain synchronous
//! data with no interior locking; the server wraps it in a lock and injects
//! it through shared state, so tests can build isolated stores directly.

pub mod query;
pub mod seed;
pub mod task;
pub mod validate;

use chrono::Utc;
use thiserror::Error;

pub use task::{Priority, Task, TaskDraft, TaskPatch};

/// No fresh id is left to assign: a record already holds the maximum
/// representable id.
#[derive(Debug, Error)]
#[error("task id space exhausted")]
pub struct IdSpaceExhausted;

/// The process-lifetime task collection, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store over an already-normalized set of records, e.g. the
    /// seed dataset.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// A point-in-time copy of the whole collection in stored order.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get(&self, id: u64) -> Option<Task> {
        self.tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn by_priority(&self, priority: Priority) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.priority == priority)
            .cloned()
            .collect()
    }

    /// Ids are one past the current maximum, so an id freed by deleting the
    /// highest record can be handed out again. A seed record can place the
    /// maximum anywhere, including at the top of the id range, so the
    /// increment is checked rather than assumed.
    fn next_id(&self) -> Result<u64, IdSpaceExhausted> {
        match self.tasks.iter().map(|t| t.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(IdSpaceExhausted),
        }
    }

    /// Appends a new record built from a validated draft, filling in the
    /// assigned id, creation timestamp, and the `completed`/`priority`
    /// defaults. Returns a copy of the stored record, or
    /// [`IdSpaceExhausted`] when no id is left to assign.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, IdSpaceExhausted> {
        let task = Task {
            id: self.next_id()?,
            title: draft.title,
            description: draft.description,
            completed: draft.completed.unwrap_or(false),
            priority: draft.priority.unwrap_or_default(),
            created_at: Utc::now(),
            started_at: None,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Merges a validated patch into the record with the given id, in place.
    /// Returns a copy of the merged record, or `None` when no record has
    /// that id.
    pub fn update(&mut self, id: u64, patch: TaskPatch) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.apply(patch);
        Some(task.clone())
    }

    /// Removes the record with the given id. Returns the removed record, or
    /// `None` when no record has that id.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: format!("{title} description"),
            completed: None,
            priority: None,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids_and_defaults() {
        let mut store = TaskStore::new();

        let first = store.create(draft("first")).unwrap();
        let second = store.create(draft("second")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.completed);
        assert_eq!(first.priority, Priority::Low);
        assert_eq!(first.started_at, None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_honors_explicit_fields() {
        let mut store = TaskStore::new();
        let task = store
            .create(TaskDraft {
                title: "urgent".to_string(),
                description: "now".to_string(),
                completed: Some(true),
                priority: Some(Priority::High),
            })
            .unwrap();

        assert!(task.completed);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_create_commits_to_the_collection() {
        let mut store = TaskStore::new();
        let created = store.create(draft("persist me")).unwrap();
        assert_eq!(store.get(created.id), Some(created));
    }

    #[test]
    fn test_next_id_reuses_freed_maximum() {
        let mut store = TaskStore::new();
        store.create(draft("a")).unwrap();
        let b = store.create(draft("b")).unwrap();
        store.create(draft("c")).unwrap();

        // Removing a middle record leaves the maximum untouched.
        store.remove(b.id);
        assert_eq!(store.create(draft("d")).unwrap().id, 4);

        // Removing the maximum frees its id for the next create.
        store.remove(4);
        assert_eq!(store.create(draft("e")).unwrap().id, 4);
    }

    #[test]
    fn test_create_fails_once_id_space_is_exhausted() {
        let mut task = TaskStore::new().create(draft("ceiling")).unwrap();
        task.id = u64::MAX;
        let mut store = TaskStore::from_tasks(vec![task]);

        assert!(store.create(draft("one too many")).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_merges_in_place() {
        let mut store = TaskStore::new();
        let created = store.create(draft("original")).unwrap();

        let updated = store
            .update(
                created.id,
                TaskPatch {
                    completed: Some(true),
                    ..TaskPatch::default()
                },
            )
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "original");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.get(created.id), Some(updated));
    }

    #[test]
    fn test_update_missing_id_is_none() {
        let mut store = TaskStore::new();
        assert_eq!(store.update(42, TaskPatch::default()), None);
    }

    #[test]
    fn test_remove_shrinks_and_forgets() {
        let mut store = TaskStore::new();
        let a = store.create(draft("a")).unwrap();
        let b = store.create(draft("b")).unwrap();

        let removed = store.remove(a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(a.id));
        assert!(store.contains(b.id));
        assert_eq!(store.remove(a.id), None);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = TaskStore::new();
        store.create(draft("a")).unwrap();

        let mut snapshot = store.snapshot();
        snapshot.clear();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_by_priority_filters() {
        let mut store = TaskStore::new();
        store
            .create(TaskDraft {
                priority: Some(Priority::High),
                ..draft("a")
            })
            .unwrap();
        store.create(draft("b")).unwrap();
        store
            .create(TaskDraft {
                priority: Some(Priority::High),
                ..draft("c")
            })
            .unwrap();

        let high = store.by_priority(Priority::High);
        assert_eq!(high.len(), 2);
        assert!(high.iter().all(|t| t.priority == Priority::High));
        assert!(store.by_priority(Priority::Medium).is_empty());
    }
}
