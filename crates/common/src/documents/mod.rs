//! Redis-backed document store for full texts
//!
//! Each full text is one JSON document per key, namespaced by database and
//! collection. The collection's id list preserves insertion order. Both are
//! written in a single atomic pipeline over a reconnecting connection
//! shared across requests.

use crate::config::DocumentStoreConfig;
use crate::errors::{AppError, Result};
use crate::storage::{FullTextRecord, FullTextStore, StoredDocument};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, Client};
use tracing::{debug, info};
use uuid::Uuid;

/// Redis document store client
#[derive(Clone)]
pub struct DocumentStore {
    connection: ConnectionManager,
    namespace: Namespace,
}

impl DocumentStore {
    /// Connect to Redis
    pub async fn new(config: &DocumentStoreConfig) -> Result<Self> {
        let url = config.url.as_deref().ok_or_else(|| AppError::Configuration {
            message: "documents.url is not set".to_string(),
        })?;

        info!("Connecting to document store...");

        let client = Client::open(url)
            .map_err(|e| AppError::DocumentStore {
                message: format!("Failed to create Redis client: {}", e)
            })?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::DocumentStore {
                message: format!("Failed to connect to Redis: {}", e),
            })?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "Document store connection established"
        );

        Ok(Self {
            connection,
            namespace: Namespace::from_config(config),
        })
    }

    /// Insert a full text, returning its generated id
    pub async fn insert_one(&self, record: &FullTextRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let doc = StoredDocument {
            id,
            record: record.clone(),
        };
        let json = serde_json::to_string(&doc)?;
        let key = self.namespace.document(id);

        let mut conn = self.connection.clone();
        redis::pipe()
            .atomic()
            .set(&key, &json)
            .ignore()
            .rpush(self.namespace.ids(), id.to_string())
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::DocumentStore {
                message: format!("Failed to insert document '{}': {}", key, e),
            })?;

        debug!(key = %key, "Document inserted");
        Ok(id)
    }

    /// Ping Redis to check connectivity
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| AppError::DocumentStore {
                message: format!("Redis ping failed: {}", e),
            })?;
        Ok(())
    }
}

#[async_trait]
impl FullTextStore for DocumentStore {
    async fn insert_full_text(&self, record: &FullTextRecord) -> Result<Uuid> {
        self.insert_one(record).await
    }

    async fn ping(&self) -> Result<()> {
        DocumentStore::ping(self).await
    }

    fn backend_name(&self) -> &str {
        "redis"
    }
}

/// Key layout: `{prefix}:{database}:{collection}:...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    base: String,
}

impl Namespace {
    pub fn new(prefix: &str, database: &str, collection: &str) -> Self {
        Self {
            base: format!("{}:{}:{}", prefix, database, collection),
        }
    }

    pub fn from_config(config: &DocumentStoreConfig) -> Self {
        Self::new(&config.key_prefix, &config.database, &config.collection)
    }

    /// Key of one document
    pub fn document(&self, id: Uuid) -> String {
        format!("{}:{}", self.base, id)
    }

    /// Key of the collection's id list
    pub fn ids(&self) -> String {
        format!("{}:ids", self.base)
    }
}
