use crate::core::error::ApiError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

/// Request-body extractor that accepts both JSON and URL-encoded forms.
///
/// The original API mounted both body parsers, and real clients use
/// both, so `Content-Type` decides which decoder runs: `application/json`
/// goes through serde_json, everything else through serde_urlencoded.
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidParameter(format!("Failed to read body: {}", e)))?;

        let value = if is_json {
            serde_json::from_slice::<T>(&bytes)
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid JSON body: {}", e)))?
        } else {
            serde_urlencoded::from_bytes::<T>(&bytes)
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid form body: {}", e)))?
        };

        Ok(FormOrJson(value))
    }
}
