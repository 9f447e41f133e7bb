//! Blog Summariser Common Library
//!
//! Shared code for the gateway and the client including:
//! - Configuration management
//! - Error types and handling
//! - Relational store (summaries) and document store (full texts)
//! - The dual-write save path
//! - Scrape, summary and translation stubs
//! - Metrics

pub mod config;
pub mod db;
pub mod documents;
pub mod errors;
pub mod metrics;
pub mod storage;
pub mod text;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use documents::DocumentStore;
pub use storage::{BlogSubmission, DualWriter, WritePolicy, WriteReport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
