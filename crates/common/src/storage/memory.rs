//! In-process stores
//!
//! Used by the `memory` backend and throughout the test suites. Each store
//! can be switched into a simulated outage where every call fails.

use super::{FullTextRecord, FullTextStore, StoredDocument, SummaryRecord, SummaryStore};
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Summary rows kept in a map
#[derive(Default)]
pub struct MemorySummaryStore {
    rows: RwLock<HashMap<Uuid, SummaryRecord>>,
    unavailable: AtomicBool,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub async fn get(&self, id: Uuid) -> Option<SummaryRecord> {
        self.rows.read().await.get(&id).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseConnection {
                message: "memory summary store is unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn insert_summary(&self, record: &SummaryRecord) -> Result<Uuid> {
        self.check_available()?;
        let id = Uuid::new_v4();
        self.rows.write().await.insert(id, record.clone());
        Ok(id)
    }

    async fn delete_summary(&self, id: Uuid) -> Result<bool> {
        self.check_available()?;
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

/// Full-text documents kept in insertion order
#[derive(Default)]
pub struct MemoryFullTextStore {
    documents: RwLock<Vec<StoredDocument>>,
    unavailable: AtomicBool,
}

impl MemoryFullTextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    pub async fn documents(&self) -> Vec<StoredDocument> {
        self.documents.read().await.clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DocumentStore {
                message: "memory document store is unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FullTextStore for MemoryFullTextStore {
    async fn insert_full_text(&self, record: &FullTextRecord) -> Result<Uuid> {
        self.check_available()?;
        let id = Uuid::new_v4();
        self.documents.write().await.push(StoredDocument {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
