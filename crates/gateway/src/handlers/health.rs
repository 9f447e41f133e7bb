//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::future::Future;
use crate::AppState;
use blogsum_common::errors::Result;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub relational: CheckResult,
    pub document: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    fn is_up(&self) -> bool {
        self.status == "up"
    }
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - pings both stores
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let summaries = state.writer.summaries();
    let full_texts = state.writer.full_texts();

    let (relational, document) = tokio::join!(
        check(summaries.backend_name(), summaries.ping()),
        check(full_texts.backend_name(), full_texts.ping()),
    );

    let all_healthy = relational.is_up() && document.is_up();

    Json(ReadyResponse {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            relational,
            document,
        },
    })
}

async fn check(backend: &str, ping: impl Future<Output = Result<()>>) -> CheckResult {
    let start = std::time::Instant::now();

    match ping.await {
        Ok(_) => CheckResult {
            status: "up".to_string(),
            backend: backend.to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => CheckResult {
            status: "down".to_string(),
            backend: backend.to_string(),
            latency_ms: None,
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use blogsum_common::storage::WritePolicy;

    #[tokio::test]
    async fn test_health() {
        let app = app(WritePolicy::Independent);
        let response = send(&app.router, get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_with_both_stores_up() {
        let app = app(WritePolicy::Independent);
        let body = body_json(send(&app.router, get("/ready")).await).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"]["relational"]["backend"], "memory");
        assert_eq!(body["checks"]["document"]["status"], "up");
    }

    #[tokio::test]
    async fn test_ready_reports_down_store() {
        let app = app(WritePolicy::Independent);
        app.full_texts.set_unavailable(true);

        let body = body_json(send(&app.router, get("/ready")).await).await;
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["checks"]["relational"]["status"], "up");
        assert_eq!(body["checks"]["document"]["status"], "down");
        assert!(body["checks"]["document"]["error"].is_string());
    }
}
