//! Tests for the feed machinery

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::mock::MockSentimentClient;
use crate::client::{MockSentimentSource, SentimentSource};
use crate::error::{DashError, Result};
use crate::state::feed::SentimentFeed;
use crate::types::{DailySentimentRecord, SentimentClass};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn row_for(start: NaiveDate) -> DailySentimentRecord {
    DailySentimentRecord {
        keyword: format!("range-{start}"),
        sentiment: SentimentClass::Positive,
        date: start,
        avg_pos: Some(0.5),
        avg_neg: Some(0.2),
        avg_mix: None,
        avg_neutral: None,
        count: 10,
    }
}

/// Scripted source: echoes the requested range back as a row, optionally
/// sleeping or failing for one specific start date
#[derive(Default)]
struct ScriptedSource {
    slow_start: Option<NaiveDate>,
    fail_start: Option<NaiveDate>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentSource for ScriptedSource {
    async fn fetch_daily(
        &self,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<DailySentimentRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.slow_start == Some(start) {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_start == Some(start) {
            return Err(DashError::Api("backend down".into()));
        }
        Ok(vec![row_for(start)])
    }
}

#[tokio::test]
async fn test_latest_refresh_wins_over_slow_response() {
    let a = date("2026-03-01");
    let b = date("2026-04-01");
    let source = Arc::new(ScriptedSource {
        slow_start: Some(a),
        delay: Duration::from_millis(100),
        ..Default::default()
    });

    let feed = Arc::new(SentimentFeed::new(source));
    let slow = {
        let feed = feed.clone();
        tokio::spawn(async move { feed.refresh(a, a).await })
    };
    // Let the slow fetch get in flight, then supersede it
    tokio::time::sleep(Duration::from_millis(10)).await;
    feed.refresh(b, b).await;
    slow.await.unwrap();

    let state = feed.state();
    assert!(state.is_ready());
    assert_eq!(state.data.len(), 1);
    // The slow response for range A resolved last but was dropped
    assert_eq!(state.data[0].keyword, format!("range-{b}"));
}

#[tokio::test]
async fn test_error_retains_last_known_good_rows() {
    let good = date("2026-03-01");
    let bad = date("2026-05-01");
    let source = Arc::new(ScriptedSource {
        fail_start: Some(bad),
        ..Default::default()
    });

    let feed = SentimentFeed::new(source);
    feed.refresh(good, good).await;
    let state = feed.refresh(bad, bad).await;

    assert_eq!(state.error.as_deref(), Some("API error: backend down"));
    assert!(!state.loading);
    // Previous rows stay visible alongside the error
    assert_eq!(state.data.len(), 1);
    assert_eq!(state.data[0].keyword, format!("range-{good}"));
}

#[tokio::test]
async fn test_cache_replays_success_without_refetch() {
    let start = date("2026-03-01");
    let source = Arc::new(ScriptedSource::default());

    let feed = SentimentFeed::new(source.clone());
    let first = feed.refresh(start, start).await;
    let second = feed.refresh(start, start).await;

    assert_eq!(source.calls(), 1);
    assert_eq!(first.data.len(), second.data.len());
    assert!(second.is_ready());
}

#[tokio::test]
async fn test_cache_replays_failure_without_refetch() {
    let bad = date("2026-05-01");
    let source = Arc::new(ScriptedSource {
        fail_start: Some(bad),
        ..Default::default()
    });

    let feed = SentimentFeed::new(source.clone());
    feed.refresh(bad, bad).await;
    let state = feed.refresh(bad, bad).await;

    assert_eq!(source.calls(), 1);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_distinct_ranges_fetch_separately() {
    let a = date("2026-03-01");
    let b = date("2026-04-01");
    let source = Arc::new(ScriptedSource::default());

    let feed = SentimentFeed::new(source.clone());
    feed.refresh(a, a).await;
    feed.refresh(b, b).await;

    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_feeds_are_independent() {
    let a = date("2026-03-01");
    let b = date("2026-04-01");
    let source = Arc::new(ScriptedSource::default());

    let feed_a = SentimentFeed::new(source.clone());
    let feed_b = SentimentFeed::new(source.clone());
    feed_a.refresh(a, a).await;
    feed_b.refresh(b, b).await;

    assert_eq!(feed_a.records()[0].keyword, format!("range-{a}"));
    assert_eq!(feed_b.records()[0].keyword, format!("range-{b}"));
}

#[tokio::test]
async fn test_feed_with_scripted_mock_source() {
    let mut source = MockSentimentSource::new();
    source
        .expect_fetch_daily()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let feed = SentimentFeed::new(Arc::new(source));
    let state = feed.refresh(date("2026-03-01"), date("2026-03-31")).await;

    assert!(state.is_ready());
    assert!(state.data.is_empty());
}

#[tokio::test]
async fn test_feed_feeds_the_aggregation_engine() {
    let feed = SentimentFeed::new(Arc::new(MockSentimentClient::new()));
    let state = feed.refresh(date("2026-03-01"), date("2026-03-02")).await;
    assert!(state.is_ready());

    let keywords = crate::analytics::keywords(&state.data);
    assert_eq!(keywords, vec!["cities_sky2", "hollow_knight", "palworld"]);

    let series = crate::analytics::time_series(&state.data, None);
    assert_eq!(series.len(), 2);
}
