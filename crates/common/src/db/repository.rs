//! Repository pattern for the summaries table

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::Result;
use crate::storage::{SummaryRecord, SummaryStore};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Repository for summary rows
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    /// Insert a summary row. Every call is a fresh row.
    pub async fn create_summary(&self, record: &SummaryRecord) -> Result<Summary> {
        let now = chrono::Utc::now();

        let summary = SummaryActiveModel {
            id: Set(Uuid::new_v4()),
            url: Set(record.url.clone()),
            summary: Set(record.summary.clone()),
            urdu_summary: Set(record.urdu_summary.clone()),
            created_at: Set(now.into()),
        };

        summary.insert(self.conn()).await.map_err(Into::into)
    }

    /// Delete summary by ID
    pub async fn delete_summary(&self, id: Uuid) -> Result<bool> {
        let result = SummaryEntity::delete_by_id(id)
            .exec(self.conn())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl SummaryStore for Repository {
    async fn insert_summary(&self, record: &SummaryRecord) -> Result<Uuid> {
        let row = self.create_summary(record).await?;
        tracing::debug!(summary_id = %row.id, "Summary row inserted");
        Ok(row.id)
    }

    async fn delete_summary(&self, id: Uuid) -> Result<bool> {
        Repository::delete_summary(self, id).await
    }

    async fn ping(&self) -> Result<()> {
        Repository::ping(self).await
    }

    fn backend_name(&self) -> &str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn record() -> SummaryRecord {
        SummaryRecord {
            url: "https://example.com/post".into(),
            summary: "Summary: This is the full blog text...".into(),
            urdu_summary: "summary: یہ ہے یہ مکمل بلاگ text...".into(),
        }
    }

    fn row(id: Uuid) -> Summary {
        Summary {
            id,
            url: record().url,
            summary: record().summary,
            urdu_summary: record().urdu_summary,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_row_id() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(id)]])
            .into_connection();
        let repo = Repository::new(DbPool::from_connection(db));

        let inserted = repo.insert_summary(&record()).await.unwrap();
        assert_eq!(inserted, id);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
            ])
            .into_connection();
        let repo = Repository::new(DbPool::from_connection(db));

        let id = Uuid::new_v4();
        assert!(repo.delete_summary(id).await.unwrap());
        assert!(!repo.delete_summary(id).await.unwrap());
    }
}
