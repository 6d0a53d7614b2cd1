//! Health monitor
//!
//! Reports backing-store reachability. Every failure mode becomes a status
//! value; `check_status` itself cannot fail.

use std::sync::Arc;

use pashu_common::db::DocumentStore;
use pashu_common::StoreStatus;
use tracing::debug;

/// Upper bound on collection names reported per check
pub const MAX_REPORTED_COLLECTIONS: usize = 10;

#[derive(Clone)]
pub struct HealthMonitor {
    store: Option<Arc<dyn DocumentStore>>,
}

impl HealthMonitor {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    /// Probe the store by listing its collections
    pub async fn check_status(&self) -> StoreStatus {
        let Some(store) = &self.store else {
            return StoreStatus::unconfigured();
        };

        let status = match store.list_collections().await {
            Ok(mut collections) => {
                collections.truncate(MAX_REPORTED_COLLECTIONS);
                StoreStatus::reachable(collections)
            }
            Err(e) => {
                debug!("Store health check failed: {}", e);
                StoreStatus::unreachable(e.to_string())
            }
        };

        status.with_detail("store_name", store.name())
    }
}
