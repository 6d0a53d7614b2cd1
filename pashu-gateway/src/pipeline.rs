//! Classification pipeline
//!
//! registry lookup → module prediction → output check → response
//! composition → audit write (awaited, outcome discarded) → result.

use pashu_common::ClassificationResult;
use tracing::{debug, info};

use crate::compose::compose;
use crate::error::{GatewayError, GatewayResult};
use crate::modules::validate_predictions;
use crate::upload::UploadedFile;
use crate::AppState;

/// Run `module_name` over an already-received batch
pub async fn classify(
    state: &AppState,
    module_name: &str,
    files: Vec<UploadedFile>,
) -> GatewayResult<ClassificationResult> {
    let module = state.registry.get(module_name)?;
    let primary = files.first().ok_or(GatewayError::EmptyBatch)?;

    debug!("Dispatching '{}' to module '{}'", primary.name(), module_name);

    let failure = |reason: String| GatewayError::PredictionFailure {
        module: module_name.to_string(),
        reason,
    };

    let predictions = module
        .predict(primary)
        .await
        .map_err(|e| failure(e.to_string()))?;
    validate_predictions(&predictions).map_err(|e| failure(e.to_string()))?;

    let result = compose(module.as_ref(), predictions, &files)?;

    // Awaited so the attempt completes before the response is sent
    state.audit.record(module_name, &files, &result).await;

    if let Some(top) = result.top() {
        info!(
            "{}: '{}' → {} ({:.2}), {} file(s)",
            module_name,
            primary.name(),
            top.label,
            top.confidence,
            files.len()
        );
    }

    Ok(result)
}
