use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::server::ApiError;
use crate::store::TaskStore;

/// Shared handler state: the task collection behind a process-wide lock.
///
/// Handlers hold a guard only for one synchronous store operation and never
/// across an await point. A lock poisoned by a panicking handler turns into
/// an internal error instead of poisoning the whole process.
pub struct AppState {
    tasks: RwLock<TaskStore>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            tasks: RwLock::new(store),
        }
    }

    pub fn read_tasks(&self) -> Result<RwLockReadGuard<'_, TaskStore>, ApiError> {
        self.tasks
            .read()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("task store lock poisoned")))
    }

    pub fn write_tasks(&self) -> Result<RwLockWriteGuard<'_, TaskStore>, ApiError> {
        self.tasks
            .write()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("task store lock poisoned")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskDraft;

    #[test]
    fn test_writes_are_visible_to_readers() {
        let state = AppState::new(TaskStore::new());

        state
            .write_tasks()
            .unwrap()
            .create(TaskDraft {
                title: "shared".to_string(),
                description: "visible".to_string(),
                completed: None,
                priority: None,
            })
            .unwrap();

        assert_eq!(state.read_tasks().unwrap().len(), 1);
    }
}
