//! Daily-record feed
//!
//! One feed instance per data need. Each owns an independent
//! [`ListState`] machine, a session cache, and a monotonic request
//! generation: overlapping refreshes resolve deterministically because a
//! response is applied only while its generation is still the latest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::client::SentimentSource;
use crate::state::cache::{FetchCache, FetchOutcome};
use crate::state::{ListAction, ListState};
use crate::types::DailySentimentRecord;

const DAILY_KIND: &str = "daily";

/// Async feed of daily sentiment records
pub struct SentimentFeed {
    source: Arc<dyn SentimentSource>,
    state: RwLock<ListState<DailySentimentRecord>>,
    cache: FetchCache<DailySentimentRecord>,
    generation: AtomicU64,
}

impl SentimentFeed {
    pub fn new(source: Arc<dyn SentimentSource>) -> Self {
        Self {
            source,
            state: RwLock::new(ListState::new()),
            cache: FetchCache::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current machine state
    pub fn state(&self) -> ListState<DailySentimentRecord> {
        self.state.read().clone()
    }

    /// Snapshot of the current rows (possibly stale while an error is set)
    pub fn records(&self) -> Vec<DailySentimentRecord> {
        self.state.read().data.clone()
    }

    /// Fetch the range and drive the state machine.
    ///
    /// A cached outcome for the same range is replayed without a network
    /// call. Responses of superseded refreshes are dropped, never applied.
    /// Fetch errors land in `ListState.error`; this never returns one.
    pub async fn refresh(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ListState<DailySentimentRecord> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().apply(ListAction::Loading);

        let key = FetchCache::<DailySentimentRecord>::key(DAILY_KIND, start, end);
        if let Some(outcome) = self.cache.get(&key) {
            debug!(%key, "replaying cached fetch outcome");
            self.apply_if_current(generation, outcome);
            return self.state();
        }

        let outcome = match self.source.fetch_daily(start, end).await {
            Ok(records) => FetchOutcome::Success(records),
            Err(err) => FetchOutcome::Failure(err.to_string()),
        };
        self.cache.insert(key, outcome.clone());
        self.apply_if_current(generation, outcome);
        self.state()
    }

    fn apply_if_current(&self, generation: u64, outcome: FetchOutcome<DailySentimentRecord>) {
        // Generation is checked under the state lock so a newer refresh
        // cannot interleave between the check and the apply
        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "dropping stale fetch response");
            return;
        }

        let action = match outcome {
            FetchOutcome::Success(records) => ListAction::Success(records),
            FetchOutcome::Failure(message) => ListAction::Error(message),
        };
        state.apply(action);
    }
}
