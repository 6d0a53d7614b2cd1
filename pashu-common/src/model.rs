//! Request, result, and audit data model
//!
//! These types are shared between the gateway's request path (which builds
//! [`ClassificationResult`]s) and the audit/health paths (which persist
//! [`AuditLogEntry`]s and report [`StoreStatus`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Minimal metadata describing one uploaded file
///
/// `size_bytes` is only known once the part's stream has been fully read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Client-supplied file name
    pub name: String,
    /// Declared MIME type of the part
    pub content_type: String,
    /// Number of bytes read from the part
    pub size_bytes: u64,
}

/// One ranked label produced by a prediction module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// True when the confidence is a finite value in [0, 1]
    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

/// Response payload for one classification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Name of the module that produced the predictions
    pub module: String,
    /// Ranked predictions, highest confidence first
    pub predictions: Vec<Prediction>,
    /// Batch metadata plus module-specific derived fields
    pub meta: Map<String, Value>,
}

impl ClassificationResult {
    /// Top-ranked prediction, if any
    pub fn top(&self) -> Option<&Prediction> {
        self.predictions.first()
    }
}

/// Snapshot of one request and its result, written to the backing store
///
/// Fields are private so an entry cannot be altered after construction;
/// `filenames`, `content_types` and `sizes` are always aligned by file index.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogEntry {
    id: Uuid,
    module: String,
    filenames: Vec<String>,
    content_types: Vec<String>,
    sizes: Vec<u64>,
    result: ClassificationResult,
    timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Build an entry from the request batch and its composed result
    pub fn new(module: impl Into<String>, files: &[FileMeta], result: ClassificationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            module: module.into(),
            filenames: files.iter().map(|f| f.name.clone()).collect(),
            content_types: files.iter().map(|f| f.content_type.clone()).collect(),
            sizes: files.iter().map(|f| f.size_bytes).collect(),
            result,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn content_types(&self) -> &[String] {
        &self.content_types
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn result(&self) -> &ClassificationResult {
        &self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Connectivity state of the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreState {
    /// No store client was configured at startup
    Unconfigured,
    /// A client exists but introspection failed
    Unreachable,
    /// Introspection succeeded
    Reachable,
}

/// Result of a single health check, produced fresh every time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatus {
    pub state: StoreState,
    pub reachable: bool,
    /// First collection names reported by the store (connectivity proof)
    pub collections: Vec<String>,
    /// Human-readable diagnostics (e.g. `error`, `store_name`)
    pub details: BTreeMap<String, String>,
}

impl StoreStatus {
    pub fn unconfigured() -> Self {
        Self {
            state: StoreState::Unconfigured,
            reachable: false,
            collections: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    pub fn unreachable(error: impl Into<String>) -> Self {
        let mut details = BTreeMap::new();
        details.insert("error".to_string(), error.into());
        Self {
            state: StoreState::Unreachable,
            reachable: false,
            collections: Vec::new(),
            details,
        }
    }

    pub fn reachable(collections: Vec<String>) -> Self {
        Self {
            state: StoreState::Reachable,
            reachable: true,
            collections,
            details: BTreeMap::new(),
        }
    }

    /// Attach a diagnostic detail
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
