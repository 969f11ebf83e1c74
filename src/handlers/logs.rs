use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{LogEntry, LogResponse, LogsQuery};
use crate::utils::time::to_date_string;
use crate::validation::params::build_log_filter;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Filtered, capped log query for one user
///
/// GET /api/users/{_id}/logs?from=YYYY-MM-DD&to=YYYY-MM-DD&limit=N
///
/// `from`/`to` are inclusive bounds and may combine. `limit` falls back
/// to the configured default when absent or non-numeric. Results are
/// ordered ascending by date (insertion order within a day).
pub async fn get_logs_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<LogsQuery>,
) -> Result<Response, ApiError> {
    let user = state.user_store.get(&user_id).ok_or_else(|| {
        state.metrics.increment_failed();
        ApiError::NotFound("User".to_string())
    })?;

    let filter =
        build_log_filter(&query, state.config.limits.default_log_limit).inspect_err(|_| {
            state.metrics.increment_failed();
        })?;

    let exercises = state.exercise_store.query(&user.id, &filter);
    state.metrics.increment_log_queries();

    debug!(
        user_id = %user.id,
        from = ?filter.from,
        to = ?filter.to,
        limit = filter.limit,
        returned = exercises.len(),
        "Log query served"
    );

    let log: Vec<LogEntry> = exercises
        .iter()
        .map(|ex| LogEntry {
            description: ex.description.clone(),
            duration: ex.duration,
            date: to_date_string(ex.date),
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(LogResponse {
            username: user.username.clone(),
            count: log.len(),
            id: user.id.clone(),
            log,
        }),
    )
        .into_response())
}
