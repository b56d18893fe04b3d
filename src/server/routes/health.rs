use axum::http::StatusCode;

/// Liveness probe. Carries no task-store state on purpose.
pub async fn health_check() -> StatusCode {
    tracing::trace!("health check request received");
    StatusCode::OK
}
