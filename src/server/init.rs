use axum::extract::MatchedPath;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::server::routes::{health, tasks};
use crate::server::state::AppState;
use crate::store::TaskStore;

/// Builds the application router over an already-seeded store.
///
/// `/tasks/priority/:priority` is its own route, so a priority lookup is
/// never mistaken for an id lookup; a bare `/tasks/priority` still falls
/// through to `/tasks/:id`, which reports it as an unknown id.
pub fn init_router(store: TaskStore) -> Router {
    let state = Arc::new(AppState::new(store));

    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/priority/:priority", get(tasks::tasks_by_priority))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer((
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                // Log the matched route's path (with placeholders not filled in).
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::debug!("{}", request.uri());

                info_span!(
                    "http_request",
                    method = ?request.method(),
                    matched_path,
                )
            }),
            TimeoutLayer::new(Duration::from_secs(15)),
        ))
}
