//! Classification endpoints
//!
//! Each route is bound to one fixed module name; the handlers only receive
//! the upload and hand it to the pipeline.

use axum::extract::{Multipart, State};
use axum::{routing::post, Json, Router};
use pashu_common::ClassificationResult;

use crate::error::GatewayResult;
use crate::modules::reference::{CLASSIFIER, EMOTION, SNAKE};
use crate::upload::receive_batch;
use crate::{pipeline, AppState};

async fn run_module(
    state: &AppState,
    module_name: &str,
    multipart: Option<Multipart>,
) -> GatewayResult<Json<ClassificationResult>> {
    let files = receive_batch(multipart).await?;
    let result = pipeline::classify(state, module_name, files).await?;
    Ok(Json(result))
}

/// POST /api/classify
///
/// Animal species classification of the first uploaded file.
///
/// **Errors:**
/// - 400 Bad Request: no files uploaded
pub async fn classify(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> GatewayResult<Json<ClassificationResult>> {
    run_module(&state, CLASSIFIER, multipart).await
}

/// POST /api/snake
///
/// Venomous snake assessment; `meta.danger` is `Dangerous` or `Generally Safe`.
pub async fn snake(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> GatewayResult<Json<ClassificationResult>> {
    run_module(&state, SNAKE, multipart).await
}

/// POST /api/emotion
pub async fn emotion(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> GatewayResult<Json<ClassificationResult>> {
    run_module(&state, EMOTION, multipart).await
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/api/classify", post(classify))
        .route("/api/snake", post(snake))
        .route("/api/emotion", post(emotion))
}
