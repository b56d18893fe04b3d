//! Filtering and sorting for the listing operation.
//!
//! Pure functions over a snapshot of the collection; the stored order is
//! never touched.

use super::task::Task;
use super::validate::ValidationError;

/// The sortable fields, spelled the way they appear on the wire.
pub const SORT_FIELDS: [&str; 6] = [
    "id",
    "title",
    "description",
    "completed",
    "createdAt",
    "priority",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Description,
    Completed,
    CreatedAt,
    Priority,
}

impl SortField {
    /// Field names match exactly; `createdat` is not `createdAt`.
    fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "completed" => Some(Self::Completed),
            "createdAt" => Some(Self::CreatedAt),
            "priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn from_param(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Applies the listing query parameters to a snapshot.
///
/// A `completed` filter takes precedence: when present it must equal
/// `true` or `false` (any casing) and the sort parameters are ignored
/// entirely, valid or not. Otherwise a present `sortBy` selects a stable
/// sort with `sortOrder` choosing the direction, where a missing or empty
/// order means ascending. A `sortOrder` without `sortBy` has no effect.
pub fn list(
    mut tasks: Vec<Task>,
    completed: Option<&str>,
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> Result<Vec<Task>, ValidationError> {
    if let Some(raw) = completed {
        let wanted = match raw.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(ValidationError(
                    "Invalid 'completed' query parameter. Must be 'true' or 'false'.".to_string(),
                ))
            }
        };
        tasks.retain(|t| t.completed == wanted);
        return Ok(tasks);
    }

    if let Some(raw) = sort_by {
        let field = SortField::from_param(raw).ok_or_else(|| {
            ValidationError(format!(
                "Invalid 'sortBy' parameter. Must be one of: {}.",
                SORT_FIELDS.join(", ")
            ))
        })?;
        let order = match sort_order {
            // An empty order falls back to ascending rather than failing.
            None | Some("") => SortOrder::Asc,
            Some(raw) => SortOrder::from_param(raw).ok_or_else(|| {
                ValidationError(
                    "Invalid 'sortOrder' parameter. Must be 'asc' or 'desc'.".to_string(),
                )
            })?,
        };
        sort_tasks(&mut tasks, field, order);
    }

    Ok(tasks)
}

/// Stable sort by one field. Descending reverses the comparison, not the
/// result, so records with equal keys keep their relative order either way.
pub fn sort_tasks(tasks: &mut [Task], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let by_field = match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Completed => a.completed.cmp(&b.completed),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Priority => a.priority.cmp(&b.priority),
        };
        match order {
            SortOrder::Asc => by_field,
            SortOrder::Desc => by_field.reverse(),
        }
    });
}
