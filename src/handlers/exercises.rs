use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::journal::journal::JournalOperation;
use crate::models::api::{ExerciseBody, ExerciseResponse};
use crate::utils::id::new_record_id;
use crate::utils::time::{to_date_string, today};
use crate::validation::body::FormOrJson;
use crate::validation::params::parse_date;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Log an exercise for a user
///
/// POST /api/users/{_id}/exercises with form or JSON body
/// `{description, duration, date?}`
///
/// # Flow
/// 1. Look up the user; unknown id is a structured 404
/// 2. Parse the date, defaulting to today when omitted or blank
/// 3. Append to the journal, then insert into the store
/// 4. Respond with the user's identity merged with the exercise fields,
///    date rendered as a calendar string
pub async fn add_exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    FormOrJson(body): FormOrJson<ExerciseBody>,
) -> Result<Response, ApiError> {
    let user = state.user_store.get(&user_id).ok_or_else(|| {
        state.metrics.increment_failed();
        ApiError::NotFound("User".to_string())
    })?;

    let description = body.description.trim();
    if description.is_empty() {
        state.metrics.increment_failed();
        return Err(ApiError::MissingParameter("description".to_string()));
    }

    let date = match body.date.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_date("date", raw).inspect_err(|_| {
            state.metrics.increment_failed();
        })?,
        _ => today(),
    };

    let id = new_record_id();

    state
        .journal
        .log_operation(JournalOperation::AddExercise {
            id: id.clone(),
            user_id: user.id.clone(),
            description: description.to_string(),
            duration: body.duration,
            date,
        })
        .map_err(|e| {
            warn!(error = %e, "Failed to journal exercise creation");
            state.metrics.increment_failed();
            ApiError::StoreUnavailable(e.to_string())
        })?;

    let exercise = state.exercise_store.add_exercise(
        id,
        user.id.clone(),
        description.to_string(),
        body.duration,
        date,
    );
    state.metrics.increment_exercises_logged();

    info!(
        user_id = %user.id,
        exercise_id = %exercise.id,
        duration = exercise.duration,
        date = %exercise.date,
        "Exercise logged"
    );

    Ok((
        StatusCode::OK,
        Json(ExerciseResponse {
            id: user.id.clone(),
            username: user.username.clone(),
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: to_date_string(exercise.date),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Config, LimitsConfig, LoggingConfig, ServerConfig, StorageConfig};
    use crate::journal::journal::Journal;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> Arc<AppState> {
        let journal_path = dir.path().join("test.journal");
        let config = Config {
            server: ServerConfig {
                port: 3000,
                num_threads: 1,
            },
            storage: StorageConfig {
                journal_path: journal_path.clone(),
            },
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
        };
        let journal = Journal::new(journal_path).unwrap();
        Arc::new(AppState::new(config, journal))
    }

    fn seed_user(state: &AppState, username: &str) -> String {
        let id = new_record_id();
        state.user_store.add_user(id.clone(), username.to_string());
        id
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_add_exercise_with_date() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let user_id = seed_user(&state, "alice");

        let response = add_exercise_handler(
            State(Arc::clone(&state)),
            Path(user_id.clone()),
            FormOrJson(ExerciseBody {
                description: "run".to_string(),
                duration: 30,
                date: Some("2023-01-01".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let created: ExerciseResponse = body_json(response).await;
        assert_eq!(created.id, user_id);
        assert_eq!(created.username, "alice");
        assert_eq!(created.description, "run");
        assert_eq!(created.duration, 30);
        assert_eq!(created.date, "Sun Jan 01 2023");

        assert_eq!(state.exercise_store.count_for_user(&user_id), 1);
    }

    #[tokio::test]
    async fn test_omitted_date_defaults_to_today() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let user_id = seed_user(&state, "alice");

        let response = add_exercise_handler(
            State(Arc::clone(&state)),
            Path(user_id.clone()),
            FormOrJson(ExerciseBody {
                description: "run".to_string(),
                duration: 30,
                date: None,
            }),
        )
        .await
        .unwrap();

        let created: ExerciseResponse = body_json(response).await;
        assert_eq!(created.date, to_date_string(today()));
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let result = add_exercise_handler(
            State(Arc::clone(&state)),
            Path("000000000000000000000000".to_string()),
            FormOrJson(ExerciseBody {
                description: "run".to_string(),
                duration: 30,
                date: None,
            }),
        )
        .await;

        let err = match result {
            Err(e) => e,
            Ok(_) => panic!("Expected NotFound"),
        };
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        assert!(state.exercise_store.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_date_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let user_id = seed_user(&state, "alice");

        let result = add_exercise_handler(
            State(Arc::clone(&state)),
            Path(user_id),
            FormOrJson(ExerciseBody {
                description: "run".to_string(),
                duration: 30,
                date: Some("next tuesday".to_string()),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
        assert!(state.exercise_store.is_empty());
    }

    #[tokio::test]
    async fn test_blank_description_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let user_id = seed_user(&state, "alice");

        let result = add_exercise_handler(
            State(Arc::clone(&state)),
            Path(user_id),
            FormOrJson(ExerciseBody {
                description: "".to_string(),
                duration: 30,
                date: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::MissingParameter(_))));
    }
}
