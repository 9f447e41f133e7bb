//! Configuration management for Blog Summariser services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::storage::WritePolicy;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Relational store (Postgres) configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Document store (Redis) configuration
    #[serde(default)]
    pub documents: DocumentStoreConfig,

    /// Save path configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Postgres URL for the summaries table
    pub url: Option<String>,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Create the summaries table on startup if it is missing
    #[serde(default = "default_enabled")]
    pub ensure_schema: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentStoreConfig {
    /// Redis URL (redis://host:port)
    pub url: Option<String>,

    /// Key prefix for namespacing
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Logical database name
    #[serde(default = "default_document_database")]
    pub database: String,

    /// Collection holding full texts
    #[serde(default = "default_document_collection")]
    pub collection: String,
}

/// Which store implementations back the save path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Postgres for summaries, Redis for full texts
    #[default]
    External,
    /// In-process stores, nothing survives a restart
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    #[serde(default)]
    pub write_policy: WritePolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name stamped on every HTTP request span
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per second (global)
    #[serde(default = "default_rate_limit")]
    pub requests_per_second: u32,

    /// Burst capacity
    #[serde(default = "default_burst")]
    pub burst: u32,

    /// Enable rate limiting
    #[serde(default)]
    pub enabled: bool,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_concurrent() -> usize { 100 }
fn default_max_body_bytes() -> usize { 1024 * 1024 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_key_prefix() -> String { "blogsum".to_string() }
fn default_document_database() -> String { "blog_data".to_string() }
fn default_document_collection() -> String { "full_texts".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "blogsum".to_string() }
fn default_rate_limit() -> u32 { 50 }
fn default_burst() -> u32 { 100 }
fn default_enabled() -> bool { true }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_requests: default_max_concurrent(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            ensure_schema: default_enabled(),
        }
    }
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            key_prefix: default_key_prefix(),
            database: default_document_database(),
            collection: default_document_collection(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rate_limit(),
            burst: default_burst(),
            enabled: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__DATABASE__URL=postgres://...
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Check that every credential the selected backend needs is present.
    ///
    /// The memory backend needs nothing; the external backend needs both
    /// connection URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Memory {
            return Ok(());
        }

        let mut missing = Vec::new();
        if self.database.url.as_deref().map_or(true, str::is_empty) {
            missing.push("database.url");
        }
        if self.documents.url.as_deref().map_or(true, str::is_empty) {
            missing.push("documents.url");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "missing store credentials: {}",
                missing.join(", ")
            )))
        }
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(source: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.documents.database, "blog_data");
        assert_eq!(config.documents.collection, "full_texts");
        assert_eq!(config.storage.backend, StorageBackend::External);
        assert_eq!(config.storage.write_policy, WritePolicy::Independent);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.port, 8080);
        assert!(!config.rate_limit.enabled);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_storage_section_parsing() {
        let config = from_toml(
            r#"
            [storage]
            backend = "memory"
            write_policy = "compensating"

            [server]
            port = 3000
            "#,
        );
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.write_policy, WritePolicy::Compensating);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_observability_section_parsing() {
        assert_eq!(AppConfig::default().observability.service_name, "blogsum");

        let config = from_toml(
            r#"
            [observability]
            service_name = "blogsum-eu"
            json_logging = false
            metrics_port = 0
            "#,
        );
        assert_eq!(config.observability.service_name, "blogsum-eu");
        assert!(!config.observability.json_logging);
        assert_eq!(config.observability.metrics_port, 0);
    }

    #[test]
    fn test_external_backend_requires_credentials() {
        let mut config = AppConfig::default();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("database.url"));
        assert!(err.contains("documents.url"));

        config.database.url = Some("postgres://localhost/blogsum".into());
        let err = config.validate().unwrap_err().to_string();
        assert!(!err.contains("database.url"));
        assert!(err.contains("documents.url"));

        config.documents.url = Some("redis://localhost:6379".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }
}
