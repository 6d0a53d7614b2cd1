//! Prediction modules
//!
//! A prediction module turns one uploaded file into a ranked list of
//! labels. Modules are registered once at startup (see
//! [`crate::registry::ModuleRegistry`]) and are otherwise independent of the
//! HTTP layer, so any real classifier can replace the keyword heuristics
//! without touching dispatch or response composition.
//!
//! # Output contract
//! - At least one prediction
//! - Every confidence in [0, 1]
//! - Deterministic top prediction for identical input
//! - Unrecognised input degrades to a low-confidence default set rather
//!   than an error

use async_trait::async_trait;
use pashu_common::Prediction;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::upload::UploadedFile;

pub mod keyword;
pub mod reference;

pub use keyword::{HazardRule, KeywordModule, KeywordRule};

/// Module-side failure
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The module could not process the input
    #[error("{0}")]
    Failed(String),

    /// The module returned no predictions
    #[error("module returned no predictions")]
    EmptyOutput,

    /// A confidence fell outside [0, 1]
    #[error("confidence {confidence} for '{label}' is outside [0, 1]")]
    ConfidenceOutOfRange { label: String, confidence: f64 },
}

/// Named classification capability
#[async_trait]
pub trait PredictionModule: Send + Sync {
    /// Module name as it appears in the response `module` field
    fn name(&self) -> &str;

    /// Rank labels for `file`, highest confidence first
    async fn predict(&self, file: &UploadedFile) -> Result<Vec<Prediction>, PredictionError>;

    /// Module-specific fields added to the response `meta`, derived from the
    /// top prediction only
    fn derived_meta(&self, _top: &Prediction) -> Map<String, Value> {
        Map::new()
    }
}

/// Check a module's output against the output contract
pub fn validate_predictions(predictions: &[Prediction]) -> Result<(), PredictionError> {
    if predictions.is_empty() {
        return Err(PredictionError::EmptyOutput);
    }

    if let Some(bad) = predictions.iter().find(|p| !p.has_valid_confidence()) {
        return Err(PredictionError::ConfidenceOutOfRange {
            label: bad.label.clone(),
            confidence: bad.confidence,
        });
    }

    Ok(())
}
