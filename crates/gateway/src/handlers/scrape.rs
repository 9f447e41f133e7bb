//! Scrape handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::AppState;
use blogsum_common::{errors::Result, metrics};

/// Request to scrape a blog. Any string is accepted as the url.
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub text: String,
}

/// Return the (simulated) full text of a blog
#[instrument(skip(state))]
pub async fn scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>> {
    let text = state.scraper.scrape(&request.url).await?;
    metrics::record_scrape(state.scraper.name());

    tracing::info!(url = %request.url, chars = text.chars().count(), "Blog scraped");

    Ok(Json(ScrapeResponse { text }))
}
