//! SQLite document store
//!
//! Each collection is a table holding one JSON document per row.

use super::{is_valid_collection_name, DocumentStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

/// [`DocumentStore`] backed by a SQLite connection pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    name: String,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    /// Underlying pool (for inspection by tools and tests)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{}" (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                document TEXT NOT NULL
            )
            "#,
            collection
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_document(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        if !is_valid_collection_name(collection) {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }

        self.ensure_collection(collection).await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        // Stamp the document the same way the row is stamped
        let mut document = document;
        if let Value::Object(map) = &mut document {
            map.insert("created_at".to_string(), Value::String(now.clone()));
            map.insert("updated_at".to_string(), Value::String(now.clone()));
        }

        sqlx::query(&format!(
            r#"INSERT INTO "{}" (id, created_at, updated_at, document) VALUES (?, ?, ?, ?)"#,
            collection
        ))
        .bind(&id)
        .bind(&now)
        .bind(&now)
        .bind(serde_json::to_string(&document)?)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_store;
    use serde_json::json;
    use std::time::Duration;

    fn temp_store(dir: &tempfile::TempDir) -> SqliteStore {
        let url = format!("sqlite://{}", dir.path().join("audit.db").display());
        open_store(&url, Some("audit_test"), Duration::from_secs(2)).expect("Should build store")
    }

    #[tokio::test]
    async fn test_insert_creates_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        assert!(store.list_collections().await.unwrap().is_empty());

        let id = store
            .insert_document("analysislog", json!({"module": "snake"}))
            .await
            .expect("Insert should succeed");
        assert!(Uuid::parse_str(&id).is_ok());

        assert_eq!(store.list_collections().await.unwrap(), vec!["analysislog"]);
    }

    #[tokio::test]
    async fn test_inserted_document_is_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let id = store
            .insert_document("analysislog", json!({"module": "emotion"}))
            .await
            .unwrap();

        let raw: String = sqlx::query_scalar(r#"SELECT document FROM "analysislog" WHERE id = ?"#)
            .bind(&id)
            .fetch_one(store.pool())
            .await
            .unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(doc["module"], "emotion");
        assert!(doc["created_at"].is_string());
        assert_eq!(doc["created_at"], doc["updated_at"]);
    }

    #[tokio::test]
    async fn test_invalid_collection_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let err = store
            .insert_document("bad name", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCollection(_)));
    }

    #[tokio::test]
    async fn test_store_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(temp_store(&dir).name(), "audit_test");
    }
}
