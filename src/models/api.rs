use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseBody {
    #[serde(default)]
    pub description: String,
    /// Accepts a JSON number or a numeric string (form bodies always
    /// carry strings)
    #[serde(deserialize_with = "crate::validation::params::de_duration")]
    pub duration: i64,
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: i64,
    /// Calendar string, e.g. "Sun Jan 01 2023"
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub username: String,
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogEntry>,
}

/// Raw query parameters for GET /api/users/{_id}/logs.
///
/// All fields arrive as strings; validation::params turns them into a
/// LogFilter. `limit` in particular is lenient: non-numeric values fall
/// back to the configured default instead of rejecting the request.
#[derive(Debug, Deserialize, Default)]
pub struct LogsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
