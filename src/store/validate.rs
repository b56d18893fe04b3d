//! Payload validation for the create and update operations.
//!
//! Both entry points take the raw JSON body and either produce a typed
//! payload or report the first violated rule. Rules run in a fixed order
//! (emptiness, title, description, completed, priority, then startedAt for
//! updates) so a body breaking several rules always yields the same message.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::task::{Priority, TaskDraft, TaskPatch};

/// A rejected payload, carrying the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

const EMPTY_PAYLOAD: &str = "Task data cannot be empty.";
const COMPLETED_NOT_BOOL: &str = "Completed must be a boolean value if provided.";
const PRIORITY_INVALID: &str = "Priority must be 'low', 'medium', or 'high' if provided.";
const STARTED_AT_INVALID: &str = "StartedAt must be a valid RFC 3339 timestamp if provided.";

/// Validates a creation body into a [`TaskDraft`].
///
/// `title` and `description` are mandatory; `completed` and `priority` are
/// optional with defaults applied later by the store. Unknown fields are
/// ignored.
pub fn creation_payload(payload: &Value) -> Result<TaskDraft, ValidationError> {
    let obj = non_empty_object(payload)?;
    let title = required_text(obj, "title", "Title is required and must be a non-empty string.")?;
    let description = required_text(
        obj,
        "description",
        "Description is required and must be a non-empty string.",
    )?;
    let completed = optional_bool(obj)?;
    let priority = optional_priority(obj)?;

    Ok(TaskDraft {
        title,
        description,
        completed,
        priority,
    })
}

/// Validates an update body into a [`TaskPatch`].
///
/// Every field is optional; a field that is present must still be
/// well-formed. Unknown fields are ignored.
pub fn update_payload(payload: &Value) -> Result<TaskPatch, ValidationError> {
    let obj = non_empty_object(payload)?;
    let title = optional_text(obj, "title", "Title must be a non-empty string if provided.")?;
    let description = optional_text(
        obj,
        "description",
        "Description must be a non-empty string if provided.",
    )?;
    let completed = optional_bool(obj)?;
    let priority = optional_priority(obj)?;
    let started_at = optional_timestamp(obj)?;

    Ok(TaskPatch {
        title,
        description,
        completed,
        priority,
        started_at,
    })
}

/// A payload only counts as data when it is a JSON object with at least one
/// key. Arrays, scalars, null, and `{}` are all rejected as empty.
fn non_empty_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    match payload.as_object() {
        Some(obj) if !obj.is_empty() => Ok(obj),
        _ => Err(ValidationError::new(EMPTY_PAYLOAD)),
    }
}

/// A mandatory text field: must be a string with non-whitespace content.
/// The stored value keeps its original spelling, padding included.
fn required_text(
    obj: &Map<String, Value>,
    key: &str,
    message: &str,
) -> Result<String, ValidationError> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ValidationError::new(message)),
    }
}

/// An optional text field: absent is fine, but a present value must be a
/// string with non-whitespace content.
fn optional_text(
    obj: &Map<String, Value>,
    key: &str,
    message: &str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::new(message)),
    }
}

fn optional_bool(obj: &Map<String, Value>) -> Result<Option<bool>, ValidationError> {
    match obj.get("completed") {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ValidationError::new(COMPLETED_NOT_BOOL)),
    }
}

fn optional_priority(obj: &Map<String, Value>) -> Result<Option<Priority>, ValidationError> {
    match obj.get("priority") {
        None => Ok(None),
        Some(Value::String(s)) => match s.parse::<Priority>() {
            Ok(p) => Ok(Some(p)),
            Err(_) => Err(ValidationError::new(PRIORITY_INVALID)),
        },
        Some(_) => Err(ValidationError::new(PRIORITY_INVALID)),
    }
}

fn optional_timestamp(
    obj: &Map<String, Value>,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    match obj.get("startedAt") {
        None => Ok(None),
        Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Ok(Some(ts.with_timezone(&Utc))),
            Err(_) => Err(ValidationError::new(STARTED_AT_INVALID)),
        },
        Some(_) => Err(ValidationError::new(STARTED_AT_INVALID)),
    }
}
