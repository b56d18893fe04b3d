use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use crate::server::data_models::ListParams;
use crate::server::state::AppState;
use crate::server::ApiError;
use crate::store::{query, validate, Priority, Task};

/// GET /tasks
///
/// Lists the collection, optionally filtered by `completed` or sorted by
/// `sortBy`/`sortOrder`. Parameter interpretation, including the rule that
/// a completed filter makes the sort parameters irrelevant, lives in
/// [`query::list`].
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Vec<Task>>), ApiError> {
    let snapshot = state.read_tasks()?.snapshot();
    let listed = query::list(
        snapshot,
        params.completed.as_deref(),
        params.sort_by.as_deref(),
        params.sort_order.as_deref(),
    )?;
    Ok((StatusCode::OK, Json(listed)))
}

/// GET /tasks/priority/:priority
pub async fn tasks_by_priority(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<(StatusCode, Json<Vec<Task>>), ApiError> {
    let priority: Priority = raw.parse().map_err(|_| {
        ApiError::Validation(
            "Invalid priority value. Must be 'low', 'medium', or 'high'.".to_string(),
        )
    })?;

    let matching = state.read_tasks()?.by_priority(priority);
    if matching.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No tasks found with priority '{priority}'."
        )));
    }
    Ok((StatusCode::OK, Json(matching)))
}

/// GET /tasks/:id
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let id = parse_task_id(&raw_id)?;
    let task = state
        .read_tasks()?
        .get(id)
        .ok_or_else(|| task_not_found(&raw_id))?;
    Ok((StatusCode::OK, Json(task)))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let payload = json_or_null(payload);
    let draft = validate::creation_payload(&payload)?;

    let created = state.write_tasks()?.create(draft)?;
    tracing::debug!(id = created.id, "created task");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /tasks/:id
///
/// Existence is checked before the payload, so an unknown id reports 404
/// even when the body is also invalid.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let id = parse_task_id(&raw_id)?;
    let payload = json_or_null(payload);

    let mut tasks = state.write_tasks()?;
    if !tasks.contains(id) {
        return Err(task_not_found(&raw_id));
    }
    let patch = validate::update_payload(&payload)?;
    let updated = tasks
        .update(id, patch)
        .ok_or_else(|| task_not_found(&raw_id))?;
    tracing::debug!(id = updated.id, "updated task");
    Ok((StatusCode::OK, Json(updated)))
}

/// DELETE /tasks/:id
///
/// Responds with the remaining collection in stored order.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, Json<Vec<Task>>), ApiError> {
    let id = parse_task_id(&raw_id)?;

    let mut tasks = state.write_tasks()?;
    if tasks.remove(id).is_none() {
        return Err(task_not_found(&raw_id));
    }
    tracing::debug!(id, "deleted task");
    Ok((StatusCode::OK, Json(tasks.snapshot())))
}

/// A missing or unparsable request body validates like an empty payload
/// rather than surfacing an extractor rejection.
fn json_or_null(payload: Option<Json<Value>>) -> Value {
    payload.map(|Json(value)| value).unwrap_or(Value::Null)
}

/// Ids arrive as raw path text; anything that does not parse as an id is
/// reported the same way as an id with no record, echoing the raw text.
fn parse_task_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| task_not_found(raw))
}

fn task_not_found(raw: &str) -> ApiError {
    ApiError::NotFound(format!("Task with ID '{raw}' not found."))
}
