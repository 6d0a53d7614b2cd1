//! pashu-gateway - Multi-module inference gateway
//!
//! Serves `/api/classify`, `/api/snake`, and `/api/emotion` over multipart
//! uploads, audits each result to the backing store when one is configured,
//! and reports store connectivity on `/test`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pashu_common::db::{open_store, DocumentStore};
use pashu_gateway::cli::Args;
use pashu_gateway::registry::ModuleRegistry;
use pashu_gateway::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pashu_gateway=info,pashu_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any store work
    info!(
        "Starting pashu-gateway v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = args.resolve().context("Failed to load configuration")?;

    let store: Option<Arc<dyn DocumentStore>> = match &config.database_url {
        Some(url) => {
            let store = open_store(
                url,
                config.database_name.as_deref(),
                Duration::from_secs(config.store_timeout_secs),
            )
            .context("Failed to configure backing store")?;
            Some(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set: audit logging disabled");
            None
        }
    };

    let registry = ModuleRegistry::with_reference_modules();
    info!("Prediction modules: {}", registry.names().join(", "));

    let state = AppState::new(&config, store, registry);
    let app = build_router(state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("pashu-gateway listening on http://{}", address);
    info!("Diagnostics: http://{}/test", address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
