//! Save handler
//!
//! One submission, two stores. How the writes relate is decided by the
//! configured write policy, not here.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::AppState;
use blogsum_common::{
    errors::{AppError, Result},
    storage::BlogSubmission,
};

/// Request to persist a summarised blog, inserted as given
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub url: String,

    pub summary: String,

    pub urdu_summary: String,

    pub full_text: String,
}

impl From<SaveRequest> for BlogSubmission {
    fn from(request: SaveRequest) -> Self {
        BlogSubmission {
            url: request.url,
            summary: request.summary,
            urdu_summary: request.urdu_summary,
            full_text: request.full_text,
        }
    }
}

/// Response after both writes landed
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub summary_id: Option<Uuid>,
    pub document_id: Option<Uuid>,
}

/// Write the summary row and the full-text document
#[instrument(skip(state, request), fields(url = %request.url))]
pub async fn save(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>> {
    let submission = BlogSubmission::from(request);
    let report = state.writer.save(&submission).await;

    if let Some(message) = report.failure_message() {
        return Err(AppError::WriteFailed {
            message: message.to_string(),
            details: serde_json::to_value(&report)?,
        });
    }

    Ok(Json(SaveResponse {
        success: true,
        message: "Saved to both stores".to_string(),
        summary_id: report.relational.id(),
        document_id: report.document.id(),
    }))
}
