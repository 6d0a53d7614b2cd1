//! Audit logger
//!
//! Best-effort persistence of every classification. A write is attempted
//! once per request and awaited before the response is returned; its outcome
//! never changes the response. There is no retry and no backoff.

use std::sync::Arc;

use pashu_common::db::{DocumentStore, StoreError, AUDIT_COLLECTION};
use pashu_common::{AuditLogEntry, ClassificationResult};
use tracing::{debug, warn};

use crate::upload::UploadedFile;

#[derive(Clone)]
pub struct AuditLogger {
    store: Option<Arc<dyn DocumentStore>>,
}

impl AuditLogger {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    /// Record one request and its result
    ///
    /// Always returns to the caller; store failures are logged and dropped
    /// here and nowhere else.
    pub async fn record(&self, module: &str, files: &[UploadedFile], result: &ClassificationResult) {
        let metas: Vec<_> = files.iter().map(|f| f.meta().clone()).collect();
        let entry = AuditLogEntry::new(module, &metas, result.clone());

        match self.write(&entry).await {
            Ok(id) => debug!("Audit entry {} stored as {}", entry.id(), id),
            Err(StoreError::Unconfigured) => debug!("No store configured, audit entry skipped"),
            Err(e) => warn!("Audit write failed for module '{}' (ignored): {}", module, e),
        }
    }

    /// Single write attempt; the error is returned for `record` to discard
    pub async fn write(&self, entry: &AuditLogEntry) -> Result<String, StoreError> {
        let store = self.store.as_ref().ok_or(StoreError::Unconfigured)?;
        let document = serde_json::to_value(entry)?;
        store.insert_document(AUDIT_COLLECTION, document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use pashu_common::Prediction;
    use serde_json::{Map, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        documents: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        fn name(&self) -> &str {
            "recording"
        }

        async fn insert_document(&self, collection: &str, document: Value) -> Result<String, StoreError> {
            let mut docs = self.documents.lock().unwrap();
            docs.push((collection.to_string(), document));
            Ok(docs.len().to_string())
        }

        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            Ok(vec![AUDIT_COLLECTION.to_string()])
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl DocumentStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }

        async fn insert_document(&self, _: &str, _: Value) -> Result<String, StoreError> {
            Err(StoreError::Unavailable("connection reset".to_string()))
        }

        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("connection reset".to_string()))
        }
    }

    fn sample() -> (Vec<UploadedFile>, ClassificationResult) {
        let files = vec![
            UploadedFile::new("cobra.jpg", "image/jpeg", Bytes::from_static(b"abcd")),
            UploadedFile::new("notes.txt", "text/plain", Bytes::new()),
        ];
        let result = ClassificationResult {
            module: "snake".to_string(),
            predictions: vec![Prediction::new("Venomous Snake", 0.88)],
            meta: Map::new(),
        };
        (files, result)
    }

    #[tokio::test]
    async fn test_record_writes_aligned_entry() {
        let store = Arc::new(RecordingStore::default());
        let logger = AuditLogger::new(Some(store.clone()));
        let (files, result) = sample();

        logger.record("snake", &files, &result).await;

        let docs = store.documents.lock().unwrap();
        assert_eq!(docs.len(), 1);
        let (collection, doc) = &docs[0];
        assert_eq!(collection, "analysislog");
        assert_eq!(doc["module"], "snake");
        assert_eq!(doc["filenames"], serde_json::json!(["cobra.jpg", "notes.txt"]));
        assert_eq!(doc["content_types"], serde_json::json!(["image/jpeg", "text/plain"]));
        assert_eq!(doc["sizes"], serde_json::json!([4, 0]));
        assert_eq!(doc["result"]["predictions"][0]["label"], "Venomous Snake");
        assert!(doc["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_write_surfaces_error_but_record_absorbs_it() {
        let logger = AuditLogger::new(Some(Arc::new(BrokenStore)));
        let (files, result) = sample();
        let entry = AuditLogEntry::new("snake", &[files[0].meta().clone()], result.clone());

        assert!(matches!(
            logger.write(&entry).await,
            Err(StoreError::Unavailable(_))
        ));

        // Returns normally despite the failing store
        logger.record("snake", &files, &result).await;
    }

    #[tokio::test]
    async fn test_absent_store_is_unconfigured() {
        let logger = AuditLogger::new(None);
        let (files, result) = sample();
        let entry = AuditLogEntry::new("snake", &[files[0].meta().clone()], result.clone());

        assert!(matches!(
            logger.write(&entry).await,
            Err(StoreError::Unconfigured)
        ));
        logger.record("snake", &files, &result).await;
    }
}
