use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority. The wire form is the lowercase name; parsing accepts any
/// casing and normalizes it, so a stored priority always compares equal to
/// its canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Default for newly created tasks.
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// The canonical lowercase spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Derived Deserialize would insist on the lowercase spelling; seed files in
// the wild carry mixed-case priorities and those must land normalized.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Error when a string does not name a priority.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority: '{0}' (must be 'low', 'medium', or 'high')")]
pub struct ParsePriorityError(pub String);

/// A task record, both the stored representation and the JSON wire shape.
///
/// `id` and `created_at` are fixed at creation; `started_at` only ever comes
/// in through an update and stays off the wire while unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Merges a partial update into this record. Fields the patch leaves
    /// unset keep their stored values; `id` and `created_at` are not part of
    /// a patch and never change.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(started_at) = patch.started_at {
            self.started_at = Some(started_at);
        }
    }
}

/// A validated creation payload: everything a new record needs except the
/// id and creation timestamp, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

/// A validated partial update. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub started_at: Option<DateTime<Utc>>,
}
