// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // User directory
        .route("/api/users", get(crate::handlers::users::list_users_handler))
        .route("/api/users", post(crate::handlers::users::create_user_handler))

        // Exercise log store
        .route(
            "/api/users/{_id}/exercises",
            post(crate::handlers::exercises::add_exercise_handler),
        )
        .route(
            "/api/users/{_id}/logs",
            get(crate::handlers::logs::get_logs_handler),
        )

        // Operational endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
