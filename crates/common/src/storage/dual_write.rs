//! Fan-out of one submission into the relational and document stores

use super::{BlogSubmission, FullTextStore, SummaryStore};
use crate::metrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// How the two writes of a save relate to each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Both writes run concurrently; a failure on one side never undoes the other
    #[default]
    Independent,
    /// Relational first; the document write only follows a confirmed row,
    /// and a failed document write deletes that row again
    Compensating,
}

/// What happened to one side of a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StoreOutcome {
    Written { id: Uuid },
    Failed { error: String },
    /// Not attempted because an earlier step failed
    Skipped,
    /// Written, then deleted by compensation
    RolledBack { id: Uuid },
    /// Written, but the compensating delete failed and the row is still there
    CompensationFailed { id: Uuid, error: String },
}

impl StoreOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, StoreOutcome::Written { .. })
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            StoreOutcome::Written { id }
            | StoreOutcome::RolledBack { id }
            | StoreOutcome::CompensationFailed { id, .. } => Some(*id),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StoreOutcome::Written { .. } => "written",
            StoreOutcome::Failed { .. } => "failed",
            StoreOutcome::Skipped => "skipped",
            StoreOutcome::RolledBack { .. } => "rolled_back",
            StoreOutcome::CompensationFailed { .. } => "compensation_failed",
        }
    }
}

/// Per-store result of a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    pub policy: WritePolicy,
    pub relational: StoreOutcome,
    pub document: StoreOutcome,
}

impl WriteReport {
    /// Both records landed and stayed
    pub fn is_complete(&self) -> bool {
        self.relational.is_written() && self.document.is_written()
    }

    /// Short message naming the side(s) that did not land
    pub fn failure_message(&self) -> Option<&'static str> {
        match (self.relational.is_written(), self.document.is_written()) {
            (true, true) => None,
            (false, true) => Some("Failed to save to relational store"),
            (true, false) => Some("Failed to save to document store"),
            (false, false) => match (&self.relational, &self.document) {
                // Compensation undid the row; the root cause was the document write
                (StoreOutcome::RolledBack { .. }, _) => Some("Failed to save to document store"),
                (StoreOutcome::CompensationFailed { .. }, _) => Some(
                    "Failed to save to document store; the summary row could not be removed",
                ),
                // The document write was never attempted
                (_, StoreOutcome::Skipped) => Some("Failed to save to relational store"),
                _ => Some("Failed to save to both stores"),
            },
        }
    }
}

/// Writes a submission to both stores according to a [`WritePolicy`]
pub struct DualWriter {
    summaries: Arc<dyn SummaryStore>,
    full_texts: Arc<dyn FullTextStore>,
    policy: WritePolicy,
}

impl DualWriter {
    pub fn new(
        summaries: Arc<dyn SummaryStore>,
        full_texts: Arc<dyn FullTextStore>,
        policy: WritePolicy,
    ) -> Self {
        Self {
            summaries,
            full_texts,
            policy,
        }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn summaries(&self) -> &Arc<dyn SummaryStore> {
        &self.summaries
    }

    pub fn full_texts(&self) -> &Arc<dyn FullTextStore> {
        &self.full_texts
    }

    /// Save one submission. Never returns early: the report says what landed.
    #[instrument(skip(self, submission), fields(url = %submission.url, policy = ?self.policy))]
    pub async fn save(&self, submission: &BlogSubmission) -> WriteReport {
        let report = match self.policy {
            WritePolicy::Independent => self.save_independent(submission).await,
            WritePolicy::Compensating => self.save_compensating(submission).await,
        };

        metrics::record_store_write("relational", report.relational.label());
        metrics::record_store_write("document", report.document.label());

        if report.is_complete() {
            info!(
                summary_id = ?report.relational.id(),
                document_id = ?report.document.id(),
                "Submission saved to both stores"
            );
        } else {
            warn!(
                relational = report.relational.label(),
                document = report.document.label(),
                "Submission not fully saved"
            );
        }

        report
    }

    async fn save_independent(&self, submission: &BlogSubmission) -> WriteReport {
        let summary = submission.summary_record();
        let full_text = submission.full_text_record();

        let (relational, document) = tokio::join!(
            self.summaries.insert_summary(&summary),
            self.full_texts.insert_full_text(&full_text),
        );

        WriteReport {
            policy: WritePolicy::Independent,
            relational: Self::outcome(relational, self.summaries.backend_name(), "relational"),
            document: Self::outcome(document, self.full_texts.backend_name(), "document"),
        }
    }

    async fn save_compensating(&self, submission: &BlogSubmission) -> WriteReport {
        let summary_id = match self.summaries.insert_summary(&submission.summary_record()).await {
            Ok(id) => id,
            Err(e) => {
                error!(backend = self.summaries.backend_name(), error = %e, "Relational write failed");
                return WriteReport {
                    policy: WritePolicy::Compensating,
                    relational: StoreOutcome::Failed { error: e.to_string() },
                    document: StoreOutcome::Skipped,
                };
            }
        };

        let document = match self.full_texts.insert_full_text(&submission.full_text_record()).await {
            Ok(id) => StoreOutcome::Written { id },
            Err(e) => {
                error!(backend = self.full_texts.backend_name(), error = %e, "Document write failed");
                StoreOutcome::Failed { error: e.to_string() }
            }
        };

        if document.is_written() {
            return WriteReport {
                policy: WritePolicy::Compensating,
                relational: StoreOutcome::Written { id: summary_id },
                document,
            };
        }

        metrics::record_compensation();
        let relational = match self.summaries.delete_summary(summary_id).await {
            Ok(_) => {
                info!(%summary_id, "Compensated relational write");
                StoreOutcome::RolledBack { id: summary_id }
            }
            Err(e) => {
                // Nothing else will reconcile the row
                error!(%summary_id, error = %e, "Compensation failed, summary row left in place");
                StoreOutcome::CompensationFailed {
                    id: summary_id,
                    error: e.to_string(),
                }
            }
        };

        WriteReport {
            policy: WritePolicy::Compensating,
            relational,
            document,
        }
    }

    fn outcome(
        result: crate::errors::Result<Uuid>,
        backend: &str,
        store: &str,
    ) -> StoreOutcome {
        match result {
            Ok(id) => StoreOutcome::Written { id },
            Err(e) => {
                error!(store, backend, error = %e, "Store write failed");
                StoreOutcome::Failed { error: e.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, Result};
    use crate::storage::memory::{MemoryFullTextStore, MemorySummaryStore};
    use crate::storage::SummaryRecord;

    fn submission() -> BlogSubmission {
        BlogSubmission {
            url: "https://example.com/post".into(),
            summary: "Summary: This is the full blog text...".into(),
            urdu_summary: "خلاصہ: یہ ہے یہ مکمل بلاگ متن...".into(),
            full_text: "This is the full blog text scraped from: https://example.com/post".into(),
        }
    }

    fn writer(
        policy: WritePolicy,
    ) -> (DualWriter, Arc<MemorySummaryStore>, Arc<MemoryFullTextStore>) {
        let summaries = Arc::new(MemorySummaryStore::new());
        let full_texts = Arc::new(MemoryFullTextStore::new());
        let writer = DualWriter::new(summaries.clone(), full_texts.clone(), policy);
        (writer, summaries, full_texts)
    }

    #[tokio::test]
    async fn test_independent_both_reachable() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Independent);

        let report = writer.save(&submission()).await;

        assert!(report.is_complete());
        assert_eq!(report.failure_message(), None);
        assert_eq!(summaries.len().await, 1);
        assert_eq!(full_texts.len().await, 1);

        let docs = full_texts.documents().await;
        assert_eq!(Some(docs[0].id), report.document.id());
        assert_eq!(docs[0].record.full_text, submission().full_text);
    }

    #[tokio::test]
    async fn test_independent_relational_failure_keeps_document() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Independent);
        summaries.set_unavailable(true);

        let report = writer.save(&submission()).await;

        assert!(!report.is_complete());
        assert!(matches!(report.relational, StoreOutcome::Failed { .. }));
        assert!(report.document.is_written());
        assert_eq!(report.failure_message(), Some("Failed to save to relational store"));

        // No rollback of the document that did land
        assert_eq!(full_texts.len().await, 1);
        summaries.set_unavailable(false);
        assert!(summaries.is_empty().await);
    }

    #[tokio::test]
    async fn test_independent_document_failure_keeps_row() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Independent);
        full_texts.set_unavailable(true);

        let report = writer.save(&submission()).await;

        assert!(report.relational.is_written());
        assert!(matches!(report.document, StoreOutcome::Failed { .. }));
        assert_eq!(report.failure_message(), Some("Failed to save to document store"));
        assert_eq!(summaries.len().await, 1);
    }

    #[tokio::test]
    async fn test_independent_both_fail() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Independent);
        summaries.set_unavailable(true);
        full_texts.set_unavailable(true);

        let report = writer.save(&submission()).await;
        assert_eq!(report.failure_message(), Some("Failed to save to both stores"));
    }

    #[tokio::test]
    async fn test_compensating_relational_failure_skips_document() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Compensating);
        summaries.set_unavailable(true);

        let report = writer.save(&submission()).await;

        assert!(matches!(report.relational, StoreOutcome::Failed { .. }));
        assert_eq!(report.document, StoreOutcome::Skipped);
        assert_eq!(report.failure_message(), Some("Failed to save to relational store"));
        assert!(full_texts.is_empty().await);
    }

    #[tokio::test]
    async fn test_compensating_document_failure_rolls_back_row() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Compensating);
        full_texts.set_unavailable(true);

        let report = writer.save(&submission()).await;

        assert!(matches!(report.relational, StoreOutcome::RolledBack { .. }));
        assert!(matches!(report.document, StoreOutcome::Failed { .. }));
        assert_eq!(report.failure_message(), Some("Failed to save to document store"));
        assert!(summaries.is_empty().await);
    }

    #[tokio::test]
    async fn test_compensating_success() {
        let (writer, summaries, full_texts) = writer(WritePolicy::Compensating);

        let report = writer.save(&submission()).await;

        assert!(report.is_complete());
        assert_eq!(summaries.len().await, 1);
        assert_eq!(full_texts.len().await, 1);
    }

    /// Inserts land; deletes always fail
    struct UndeletableSummaries(MemorySummaryStore);

    #[async_trait::async_trait]
    impl SummaryStore for UndeletableSummaries {
        async fn insert_summary(&self, record: &SummaryRecord) -> Result<Uuid> {
            self.0.insert_summary(record).await
        }

        async fn delete_summary(&self, _id: Uuid) -> Result<bool> {
            Err(AppError::DatabaseConnection {
                message: "connection reset during delete".to_string(),
            })
        }

        async fn ping(&self) -> Result<()> {
            self.0.ping().await
        }

        fn backend_name(&self) -> &str {
            "undeletable"
        }
    }

    #[tokio::test]
    async fn test_compensating_delete_failure_is_reported() {
        let summaries = Arc::new(UndeletableSummaries(MemorySummaryStore::new()));
        let full_texts = Arc::new(MemoryFullTextStore::new());
        full_texts.set_unavailable(true);
        let writer = DualWriter::new(summaries.clone(), full_texts.clone(), WritePolicy::Compensating);

        let report = writer.save(&submission()).await;

        // The row survives the failed delete
        assert_eq!(summaries.0.len().await, 1);
        let id = report.relational.id().unwrap();
        assert_eq!(summaries.0.get(id).await, Some(submission().summary_record()));

        assert!(!report.is_complete());
        assert!(matches!(
            &report.relational,
            StoreOutcome::CompensationFailed { error, .. } if error.contains("connection reset")
        ));
        assert!(matches!(report.document, StoreOutcome::Failed { .. }));
        assert_eq!(
            report.failure_message(),
            Some("Failed to save to document store; the summary row could not be removed")
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["relational"]["status"], "compensation_failed");
    }

    #[test]
    fn test_report_serialization() {
        let report = WriteReport {
            policy: WritePolicy::Compensating,
            relational: StoreOutcome::RolledBack { id: Uuid::nil() },
            document: StoreOutcome::Failed { error: "down".into() },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["policy"], "compensating");
        assert_eq!(value["relational"]["status"], "rolled_back");
        assert_eq!(value["document"]["status"], "failed");
        assert_eq!(value["document"]["error"], "down");
    }
}
