//! Mock sentiment source for testing
//!
//! In-process implementation of [`SentimentSource`] with canned records,
//! failure simulation and optional injected latency. Used by the feed
//! tests and anywhere a scenario needs controlled responses without a
//! network.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::SentimentSource;
use crate::error::{DashError, Result};
use crate::types::{DailySentimentRecord, SentimentClass};

/// Mock source serving records from memory
pub struct MockSentimentClient {
    records: Vec<DailySentimentRecord>,
    simulate_failures: bool,
    latency_ms: u64,
}

impl MockSentimentClient {
    pub fn new() -> Self {
        Self {
            records: Self::default_records(),
            simulate_failures: false,
            latency_ms: 0,
        }
    }

    pub fn with_records(mut self, records: Vec<DailySentimentRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_failures(mut self) -> Self {
        self.simulate_failures = true;
        self
    }

    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = ms;
        self
    }

    fn default_records() -> Vec<DailySentimentRecord> {
        let record = |keyword: &str, sentiment, date: &str, pos, neg, count| DailySentimentRecord {
            keyword: keyword.to_string(),
            sentiment,
            date: date.parse().expect("valid fixture date"),
            avg_pos: Some(pos),
            avg_neg: Some(neg),
            avg_mix: None,
            avg_neutral: None,
            count,
        };

        vec![
            record("hollow_knight", SentimentClass::Positive, "2026-03-01", 0.82, 0.06, 40),
            record("hollow_knight", SentimentClass::Positive, "2026-03-02", 0.78, 0.10, 35),
            record("hollow_knight", SentimentClass::Neutral, "2026-03-02", 0.30, 0.20, 12),
            record("cities_sky2", SentimentClass::Negative, "2026-03-01", 0.15, 0.70, 50),
            record("cities_sky2", SentimentClass::Negative, "2026-03-02", 0.20, 0.65, 45),
            record("palworld", SentimentClass::Mixed, "2026-03-01", 0.45, 0.40, 30),
            record("palworld", SentimentClass::Mixed, "2026-03-02", 0.48, 0.44, 28),
        ]
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockSentimentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentSource for MockSentimentClient {
    async fn fetch_daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySentimentRecord>> {
        self.simulate_latency().await;
        if self.simulate_failures {
            return Err(DashError::Api("mock failure".into()));
        }
        if start > end {
            return Err(DashError::InvalidDateRange { start, end });
        }

        Ok(self
            .records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> (NaiveDate, NaiveDate) {
        (start.parse().unwrap(), end.parse().unwrap())
    }

    #[tokio::test]
    async fn test_mock_filters_by_range() {
        let client = MockSentimentClient::new();
        let (start, end) = range("2026-03-01", "2026-03-01");

        let rows = client.fetch_daily(start, end).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.date == start));
    }

    #[tokio::test]
    async fn test_mock_full_range() {
        let client = MockSentimentClient::new();
        let (start, end) = range("2026-03-01", "2026-03-02");

        let rows = client.fetch_daily(start, end).await.unwrap();
        assert_eq!(rows.len(), 7);
    }

    #[tokio::test]
    async fn test_mock_failure_simulation() {
        let client = MockSentimentClient::new().with_failures();
        let (start, end) = range("2026-03-01", "2026-03-02");
        assert!(client.fetch_daily(start, end).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_custom_records() {
        let client = MockSentimentClient::new().with_records(Vec::new());
        let (start, end) = range("2026-03-01", "2026-03-02");
        assert!(client.fetch_daily(start, end).await.unwrap().is_empty());
    }
}
