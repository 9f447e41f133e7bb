//! Records written by the save path

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary row destined for the relational store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub url: String,
    pub summary: String,
    pub urdu_summary: String,
}

/// Full scraped text destined for the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTextRecord {
    pub url: String,
    pub full_text: String,
    pub created_at: DateTime<Utc>,
}

/// A full text as it sits in the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: FullTextRecord,
}

/// Everything one save request carries, before it is split across stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSubmission {
    pub url: String,
    pub summary: String,
    pub urdu_summary: String,
    pub full_text: String,
}

impl BlogSubmission {
    pub fn summary_record(&self) -> SummaryRecord {
        SummaryRecord {
            url: self.url.clone(),
            summary: self.summary.clone(),
            urdu_summary: self.urdu_summary.clone(),
        }
    }

    /// Stamped with the current time
    pub fn full_text_record(&self) -> FullTextRecord {
        FullTextRecord {
            url: self.url.clone(),
            full_text: self.full_text.clone(),
            created_at: Utc::now(),
        }
    }
}
