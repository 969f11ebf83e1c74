// Metrics endpoint

use crate::core::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// Returns JSON with service statistics: users created, exercises
/// logged, log queries served, failed requests, current store sizes,
/// uptime and requests per second.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state
        .metrics
        .get_snapshot(&state.user_store, &state.exercise_store);

    (StatusCode::OK, Json(snapshot)).into_response()
}
