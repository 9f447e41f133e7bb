//! Blog Summariser Client
//!
//! Drives one summarisation end to end against a running gateway:
//! scrape the URL, build the summary and its Urdu rendering, then save
//! everything. Any failure along the way surfaces as one generic message;
//! the cause is logged.

use blogsum_common::storage::BlogSubmission;
use blogsum_common::text::{summarise, translate_to_urdu, NO_CONTENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// What the caller is shown for any failure
pub const FAILURE_MESSAGE: &str = "Failed to fetch and summarise blog.";

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },
}

impl ClientError {
    /// The message to show a user, whatever went wrong
    pub fn user_message(&self) -> &'static str {
        FAILURE_MESSAGE
    }
}

#[derive(Debug, Deserialize)]
struct ScrapeReply {
    #[serde(default)]
    text: Option<String>,
}

/// Thin HTTP client for the gateway's API
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /api/scrape`; `None` when the reply carries no text
    pub async fn scrape(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .http
            .post(format!("{}/api/scrape", self.base_url))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                endpoint: "scrape",
                status: response.status().as_u16(),
            });
        }

        let reply: ScrapeReply = response.json().await?;
        Ok(reply.text)
    }

    /// `POST /api/save`; any non-2xx reply is a failure
    pub async fn save(&self, submission: &BlogSubmission) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/api/save", self.base_url))
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), %body, "Save rejected");
            return Err(ClientError::Status {
                endpoint: "save",
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

/// Everything a finished summarisation shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub url: String,
    pub summary: String,
    pub urdu_summary: String,
    pub full_text: String,
}

/// Scrape, summarise, translate, save. Strictly in that order.
pub struct Summariser {
    client: BlogClient,
}

impl Summariser {
    pub fn new(client: BlogClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn summarise(&self, url: &str) -> Result<SummaryView> {
        let result = self.run(url).await;
        if let Err(e) = &result {
            error!(error = %e, "Summarisation failed");
        }
        result
    }

    async fn run(&self, url: &str) -> Result<SummaryView> {
        let full_text = self
            .client
            .scrape(url)
            .await?
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_CONTENT.to_string());

        let summary = summarise(&full_text);
        let urdu_summary = translate_to_urdu(&summary);

        let submission = BlogSubmission {
            url: url.to_string(),
            summary: summary.clone(),
            urdu_summary: urdu_summary.clone(),
            full_text: full_text.clone(),
        };
        self.client.save(&submission).await?;

        info!("Summary generated and saved");

        Ok(SummaryView {
            url: url.to_string(),
            summary,
            urdu_summary,
            full_text,
        })
    }
}
