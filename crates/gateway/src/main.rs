//! Blog Summariser Gateway
//!
//! The HTTP entry point. Handles:
//! - The scrape and save endpoints
//! - Health probes and the static page shell
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use blogsum_common::{
    config::{AppConfig, StorageBackend},
    db::{DbPool, Repository},
    documents::DocumentStore,
    metrics,
    storage::{
        memory::{MemoryFullTextStore, MemorySummaryStore},
        DualWriter, FullTextStore, SummaryStore,
    },
    text::{PlaceholderScraper, Scraper},
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::{limit::ConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scraper: Arc<dyn Scraper>,
    pub writer: Arc<DualWriter>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config);

    info!(
        service = %config.observability.service_name,
        "Starting Blog Summariser gateway v{}",
        blogsum_common::VERSION
    );

    // Fail fast on missing store credentials
    config.validate().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;

    let config = Arc::new(config);

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets(metrics::LATENCY_BUCKETS)?
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Connect stores once; handlers share them
    let (summaries, full_texts) = connect_stores(&config).await?;
    let writer = DualWriter::new(summaries, full_texts, config.storage.write_policy);
    info!(policy = ?writer.policy(), "Save path ready");

    let state = AppState {
        config: config.clone(),
        scraper: Arc::new(PlaceholderScraper),
        writer: Arc::new(writer),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Build the two store handles for the configured backend
async fn connect_stores(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn SummaryStore>, Arc<dyn FullTextStore>)> {
    match config.storage.backend {
        StorageBackend::External => {
            let pool = DbPool::new(&config.database).await?;
            if config.database.ensure_schema {
                pool.ensure_schema().await?;
            }
            let documents = DocumentStore::new(&config.documents).await?;
            Ok((Arc::new(Repository::new(pool)), Arc::new(documents)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory stores; nothing survives a restart");
            Ok((
                Arc::new(MemorySummaryStore::new()),
                Arc::new(MemoryFullTextStore::new()),
            ))
        }
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let service = config.observability.service_name.clone();
    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            service = %service,
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let mut api_routes = Router::new()
        .route("/scrape", post(handlers::scrape::scrape))
        .route("/save", post(handlers::save::save));

    if config.rate_limit.enabled {
        let limiter = middleware::rate_limit::RateLimitState::new(
            config.rate_limit.requests_per_second,
            config.rate_limit.burst,
        );
        api_routes = api_routes.layer(axum::middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit::rate_limit,
        ));
    }

    // Compose the app
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .nest("/api", api_routes)
        .layer(axum::middleware::from_fn(middleware::metrics::track_requests))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TimeoutLayer::new(config.request_timeout()))
                .layer(ConcurrencyLimitLayer::new(config.server.max_concurrent_requests)),
        )
        .layer(trace)
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Router wiring over in-memory stores

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, Response};
    use blogsum_common::storage::WritePolicy;
    use tower::ServiceExt;

    pub struct TestApp {
        pub router: Router,
        pub summaries: Arc<MemorySummaryStore>,
        pub full_texts: Arc<MemoryFullTextStore>,
    }

    pub fn app_with(config: AppConfig) -> TestApp {
        let summaries = Arc::new(MemorySummaryStore::new());
        let full_texts = Arc::new(MemoryFullTextStore::new());
        let writer = DualWriter::new(
            summaries.clone(),
            full_texts.clone(),
            config.storage.write_policy,
        );

        let state = AppState {
            config: Arc::new(config),
            scraper: Arc::new(PlaceholderScraper),
            writer: Arc::new(writer),
        };

        TestApp {
            router: create_router(state),
            summaries,
            full_texts,
        }
    }

    pub fn app(policy: WritePolicy) -> TestApp {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.write_policy = policy;
        app_with(config)
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
        router.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
