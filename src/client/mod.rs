//! Sentiment data API client
//!
//! The dashboard's data layer exposes GET endpoints returning already
//! row-shaped daily sentiment data inside a `{data, error, details}`
//! envelope. This module owns that boundary: the envelope shape, the
//! source trait the feeds consume, and the reqwest implementation.

pub mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{DashError, Result};
use crate::types::DailySentimentRecord;

/// Response envelope returned by every data endpoint
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub details: Option<String>,
}

/// Source of daily sentiment rows (allows mocking)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Fetch daily records for an inclusive date range, start <= end
    async fn fetch_daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySentimentRecord>>;
}

/// HTTP client for the dashboard data API
pub struct SentimentApiClient {
    http: Client,
    base_url: String,
}

impl SentimentApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SentimentSource for SentimentApiClient {
    async fn fetch_daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySentimentRecord>> {
        if start > end {
            return Err(DashError::InvalidDateRange { start, end });
        }

        let url = format!("{}/sentiment/daily", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DashError::Api(format!(
                "daily sentiment request failed with {status}: {body}"
            )));
        }

        let envelope: ApiResponse<Vec<DailySentimentRecord>> = resp.json().await?;
        if let Some(error) = envelope.error {
            let details = envelope.details.unwrap_or_default();
            return Err(DashError::Api(format!("{error} {details}").trim().to_string()));
        }

        Ok(envelope.data.unwrap_or_default())
    }
}
