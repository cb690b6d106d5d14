pub use serde::{Deserialize, Serialize};

use crate::storage::UrlRecord;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub access_count: u64,
}

impl UrlResponse {
    /// `access_count` is passed separately so callers can fold in clicks
    /// that are still sitting in the flush buffer.
    pub fn from_record(record: &UrlRecord, base_url: &str, access_count: u64) -> Self {
        Self {
            original_url: record.original_url.clone(),
            short_code: record.short_code.clone(),
            short_url: format!("{}/{}", base_url, record.short_code),
            created_at: record.created_at,
            access_count,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnalyticsResponse {
    pub total_urls: usize,
    pub total_clicks: u64,
    pub urls: Vec<UrlResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
