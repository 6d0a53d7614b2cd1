//! Backing store abstraction
//!
//! The gateway treats its store as an opaque, possibly-unavailable
//! dependency: audit entries are written as JSON documents into named
//! collections, and health checks enumerate collection names.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[cfg(feature = "sqlx")]
pub mod init;
#[cfg(feature = "sqlx")]
mod sqlite;

#[cfg(feature = "sqlx")]
pub use init::open_store;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteStore;

/// Collection that audit entries are written to
pub const AUDIT_COLLECTION: &str = "analysislog";

/// Store-side failures
///
/// These never reach an HTTP caller: the audit logger discards them and the
/// health monitor turns them into status fields.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store client was configured
    #[error("Store not configured")]
    Unconfigured,

    /// Store could not be reached or the operation failed
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Collection name rejected (prevents SQL injection)
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    /// Document could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Document store used for audit logging and health introspection
///
/// Implementations must be safe for concurrent use; the gateway shares a
/// single handle across all requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Logical store name (reported by diagnostics)
    fn name(&self) -> &str;

    /// Insert one document into `collection`, returning its new id
    async fn insert_document(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    /// List collection names in name order
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}

/// Validate a collection name (alphanumeric and underscore only)
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() < 64
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_name_validation() {
        assert!(is_valid_collection_name("analysislog"));
        assert!(is_valid_collection_name("audit_2024"));
        assert!(!is_valid_collection_name(""));
        assert!(!is_valid_collection_name("logs; DROP TABLE x"));
        assert!(!is_valid_collection_name("a\"b"));
        assert!(!is_valid_collection_name(&"x".repeat(64)));
    }
}
