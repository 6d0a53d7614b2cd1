//! pashu-gateway library - multi-module inference gateway
//!
//! Accepts uploaded file batches, dispatches them to a named prediction
//! module, and returns ranked labels. Every classification is audited to
//! the backing store on a best-effort basis.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use pashu_common::config::GatewayConfig;
use pashu_common::db::DocumentStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod audit;
pub mod cli;
pub mod compose;
pub mod error;
pub mod health;
pub mod modules;
pub mod pipeline;
pub mod registry;
pub mod upload;

pub use crate::error::{GatewayError, GatewayResult};

use crate::audit::AuditLogger;
use crate::health::HealthMonitor;
use crate::registry::ModuleRegistry;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Module name → prediction module, fixed at startup
    pub registry: Arc<ModuleRegistry>,
    pub audit: AuditLogger,
    pub health: HealthMonitor,
    /// Whether `DATABASE_URL` / `DATABASE_NAME` were supplied
    pub database_url_set: bool,
    pub database_name_set: bool,
    pub max_upload_bytes: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire the store handle into the audit logger and health monitor
    pub fn new(
        config: &GatewayConfig,
        store: Option<Arc<dyn DocumentStore>>,
        registry: ModuleRegistry,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            audit: AuditLogger::new(store.clone()),
            health: HealthMonitor::new(store),
            database_url_set: config.database_url_set(),
            database_name_set: config.database_name_set(),
            max_upload_bytes: config.max_upload_bytes,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// CORS is fully permissive: all origins, methods, and headers.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .merge(api::diagnostics_routes())
        .merge(api::classify_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
