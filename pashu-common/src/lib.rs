//! # Pashu Common Library
//!
//! Shared code for the Pashu Mitra inference gateway:
//! - Request/result data model (predictions, audit entries, store status)
//! - Error types
//! - Configuration loading
//! - Backing store abstraction and SQLite driver

pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{AuditLogEntry, ClassificationResult, FileMeta, Prediction, StoreStatus};
