//! Relational store for summary rows
//!
//! Provides:
//! - SeaORM entity for the `summaries` table
//! - Repository for data access
//! - Connection pool management and schema bootstrap

pub mod models;
mod repository;

pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Idempotent DDL for the summaries table
const SUMMARIES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS summaries (
    id UUID PRIMARY KEY,
    url TEXT NOT NULL,
    summary TEXT NOT NULL,
    urdu_summary TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    connection: Arc<DatabaseConnection>,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let url = config.url.as_deref().ok_or_else(|| AppError::Configuration {
            message: "database.url is not set".to_string(),
        })?;

        info!("Connecting to relational store...");

        let mut opts = ConnectOptions::new(url);
        opts
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(false);

        let connection = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect to relational store: {}", e),
            })?;

        info!("Relational store connection established");

        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Wrap an existing connection
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Create the summaries table if it is missing
    pub async fn ensure_schema(&self) -> Result<()> {
        self.connection.execute_unprepared(SUMMARIES_DDL).await?;
        info!("Summaries table ready");
        Ok(())
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.connection
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}
