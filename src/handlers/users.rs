use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::journal::journal::JournalOperation;
use crate::models::api::{CreateUserBody, UserResponse};
use crate::utils::id::new_record_id;
use crate::validation::body::FormOrJson;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// List all users
///
/// GET /api/users
///
/// Returns the full directory in insertion order, projected to
/// `{_id, username}`. An empty directory is an empty JSON list, never a
/// text sentinel.
pub async fn list_users_handler(State(state): State<Arc<AppState>>) -> Response {
    let users: Vec<UserResponse> = state
        .user_store
        .list()
        .iter()
        .map(|user| UserResponse {
            id: user.id.clone(),
            username: user.username.clone(),
        })
        .collect();

    (StatusCode::OK, Json(users)).into_response()
}

/// Create a user
///
/// POST /api/users with form or JSON body `{username}`
///
/// Duplicate usernames are permitted. The journal append happens before
/// the in-memory insert; if it fails the caller gets a structured 503
/// instead of a silently dropped response.
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    FormOrJson(body): FormOrJson<CreateUserBody>,
) -> Result<Response, ApiError> {
    let username = body.username.trim();
    if username.is_empty() {
        state.metrics.increment_failed();
        return Err(ApiError::MissingParameter("username".to_string()));
    }

    let id = new_record_id();

    state
        .journal
        .log_operation(JournalOperation::AddUser {
            id: id.clone(),
            username: username.to_string(),
        })
        .map_err(|e| {
            warn!(error = %e, "Failed to journal user creation");
            state.metrics.increment_failed();
            ApiError::StoreUnavailable(e.to_string())
        })?;

    let user = state.user_store.add_user(id, username.to_string());
    state.metrics.increment_users_created();

    info!(user_id = %user.id, username = %user.username, "User created");

    Ok((
        StatusCode::OK,
        Json(UserResponse {
            id: user.id.clone(),
            username: user.username.clone(),
        }),
    )
        .into_response())
}
