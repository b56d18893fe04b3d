mod init;
mod state;
pub mod data_models;
pub mod routes;
pub mod utils;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub use init::init_router;
pub use state::AppState;

use crate::store::validate::ValidationError;
use crate::store::IdSpaceExhausted;
use data_models::ErrorBody;

/// Request failures, rendered as `{ "error": "<message>" }` with the
/// matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: `{0}`")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// Running out of assignable ids is a server-side condition, not something
/// the client can correct.
impl From<IdSpaceExhausted> for ApiError {
    fn from(err: IdSpaceExhausted) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let res = ApiError::Validation("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = ApiError::NotFound("gone".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_message_is_preserved() {
        let err: ApiError = ValidationError("Task data cannot be empty.".to_string()).into();
        assert_eq!(err.to_string(), "Task data cannot be empty.");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_id_exhaustion_is_an_internal_error() {
        let err: ApiError = IdSpaceExhausted.into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
