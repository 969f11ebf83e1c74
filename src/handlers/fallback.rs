use crate::core::error::ApiError;
use axum::response::{IntoResponse, Response};

pub async fn fallback_handler() -> Response {
    ApiError::NotFound("Endpoint".to_string()).into_response()
}
