//! Response composer
//!
//! The first file of a batch is its representative subject: it supplies
//! `filename` and `content_type` even when several files were uploaded.
//! Module-specific fields come from [`PredictionModule::derived_meta`].

use pashu_common::{ClassificationResult, Prediction};
use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};
use crate::modules::PredictionModule;
use crate::upload::UploadedFile;

/// Build the response payload for one classification
///
/// `predictions` must already satisfy the module output contract.
pub fn compose(
    module: &dyn PredictionModule,
    predictions: Vec<Prediction>,
    files: &[UploadedFile],
) -> GatewayResult<ClassificationResult> {
    let primary = files.first().ok_or(GatewayError::EmptyBatch)?;
    let top = predictions
        .first()
        .ok_or_else(|| GatewayError::PredictionFailure {
            module: module.name().to_string(),
            reason: "module returned no predictions".to_string(),
        })?;

    let mut meta = Map::new();
    meta.insert("filename".to_string(), Value::from(primary.name()));
    meta.insert("content_type".to_string(), Value::from(primary.content_type()));
    // Derived fields may not overwrite the batch fields
    for (key, value) in module.derived_meta(top) {
        meta.entry(key).or_insert(value);
    }
    meta.insert("files_count".to_string(), Value::from(files.len()));

    Ok(ClassificationResult {
        module: module.name().to_string(),
        predictions,
        meta,
    })
}
