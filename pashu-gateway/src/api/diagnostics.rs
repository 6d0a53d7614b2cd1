//! Root, greeting, and store diagnostic endpoints

use axum::{extract::State, routing::get, Json, Router};
use pashu_common::model::StoreState;
use pashu_common::StoreStatus;
use serde::Serialize;

use crate::AppState;

/// Longest store error excerpt shown by `/test`
const ERROR_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Store diagnostic report (`GET /test`)
///
/// Every field is always present; failures show up as field values.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    /// Presence of `DATABASE_URL` (never its value)
    pub database_url: String,
    /// Presence of `DATABASE_NAME` (never its value)
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticReport {
    pub fn from_status(status: StoreStatus, database_url_set: bool, database_name_set: bool) -> Self {
        let (database, connection_status) = match status.state {
            StoreState::Unconfigured => ("⚠️  Available but not initialized".to_string(), "Not Connected"),
            StoreState::Reachable => ("✅ Connected & Working".to_string(), "Connected"),
            StoreState::Unreachable => {
                let error = status.details.get("error").map(String::as_str).unwrap_or("unknown error");
                (format!("❌ Unreachable: {}", excerpt(error)), "Not Connected")
            }
        };

        Self {
            backend: "✅ Running".to_string(),
            database,
            database_url: presence(database_url_set),
            database_name: presence(database_name_set),
            connection_status: connection_status.to_string(),
            collections: status.collections,
        }
    }
}

fn presence(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn excerpt(text: &str) -> String {
    text.chars().take(ERROR_EXCERPT_CHARS).collect()
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Pashu Mitra AI Backend Running".to_string(),
    })
}

/// GET /api/hello
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!".to_string(),
    })
}

/// GET /test
///
/// Always 200; store problems degrade individual fields.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticReport> {
    let status = state.health.check_status().await;
    Json(DiagnosticReport::from_status(
        status,
        state.database_url_set,
        state.database_name_set,
    ))
}

/// Build root and diagnostic routes
pub fn diagnostics_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/test", get(test_database))
}
