//! Storage abstraction for the save path
//!
//! Provides:
//! - Store traits for the two independent backends
//! - In-memory stores for local runs and tests
//! - The dual-write coordinator and its write policies

mod dual_write;
pub mod memory;
pub mod records;

pub use dual_write::{DualWriter, StoreOutcome, WritePolicy, WriteReport};
pub use records::{BlogSubmission, FullTextRecord, StoredDocument, SummaryRecord};

use crate::errors::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Store for summary rows (relational backend)
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Insert a row and return its generated id
    async fn insert_summary(&self, record: &SummaryRecord) -> Result<Uuid>;

    /// Delete a row, returning whether it existed
    async fn delete_summary(&self, id: Uuid) -> Result<bool>;

    /// Check connectivity
    async fn ping(&self) -> Result<()>;

    /// Backend name for logs and metrics
    fn backend_name(&self) -> &str;
}

/// Store for full-text documents (document backend)
#[async_trait]
pub trait FullTextStore: Send + Sync {
    /// Insert a document and return its generated id
    async fn insert_full_text(&self, record: &FullTextRecord) -> Result<Uuid>;

    /// Check connectivity
    async fn ping(&self) -> Result<()>;

    /// Backend name for logs and metrics
    fn backend_name(&self) -> &str;
}
