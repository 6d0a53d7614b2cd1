//! HTTP API handlers for pashu-gateway

pub mod classify;
pub mod diagnostics;
pub mod health;

pub use classify::classify_routes;
pub use diagnostics::diagnostics_routes;
pub use health::health_routes;
