//! Startup loading and normalization of the seed dataset.
//!
//! The seed file is read exactly once, before the server starts listening.
//! Seed records bypass payload validation; they only get their optional
//! fields backfilled.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use super::task::{Priority, Task};
use super::TaskStore;

/// Failure to read or parse the seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Json(#[from] serde_json::Error),
}

/// The on-disk shape: one object holding a `tasks` array.
#[derive(Debug, Deserialize)]
struct SeedFile {
    tasks: Vec<SeedRecord>,
}

/// One record as it appears on disk. `createdAt`, `priority`, and
/// `startedAt` may be absent; the first two are backfilled during
/// normalization. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    id: u64,
    title: String,
    description: String,
    completed: bool,
    priority: Option<Priority>,
    created_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
}

/// Loads and normalizes the seed file into a store.
pub fn load(path: &Path) -> Result<TaskStore, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    let file: SeedFile = serde_json::from_str(&raw)?;
    let tasks = normalize(file.tasks, Utc::now(), random_priority);
    Ok(TaskStore::from_tasks(tasks))
}

/// Like [`load`], but degrades to an empty store on failure. A bad or
/// missing seed file costs the initial data, never the service.
pub fn load_or_empty(path: &Path) -> TaskStore {
    match load(path) {
        Ok(store) => store,
        Err(err) => {
            warn!("could not load seed file {}: {err}", path.display());
            TaskStore::new()
        }
    }
}

/// Backfills the optional fields: a missing `createdAt` becomes `now`, a
/// missing `priority` comes from the picker. The picker is a parameter so
/// tests can pin the choice.
fn normalize(
    records: Vec<SeedRecord>,
    now: DateTime<Utc>,
    mut pick_priority: impl FnMut() -> Priority,
) -> Vec<Task> {
    records
        .into_iter()
        .map(|record| Task {
            id: record.id,
            title: record.title,
            description: record.description,
            completed: record.completed,
            priority: record.priority.unwrap_or_else(&mut pick_priority),
            created_at: record.created_at.unwrap_or(now),
            started_at: record.started_at,
        })
        .collect()
}

/// Uniform choice without a dedicated rng dependency: run the nanosecond
/// clock through a freshly keyed `RandomState` hasher.
fn random_priority() -> Priority {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u32(nanos);
    match hasher.finish() % 3 {
        0 => Priority::Low,
        1 => Priority::Medium,
        _ => Priority::High,
    }
}
