//! Session-scoped fetch cache
//!
//! Stores the last outcome, successful or failed, per request key so a
//! parameter round-trip does not refetch. Entries are never expired or
//! invalidated; the cache lives exactly as long as its owning feed.

use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of a completed fetch, cached as-is
#[derive(Debug, Clone)]
pub enum FetchOutcome<T> {
    Success(Vec<T>),
    Failure(String),
}

/// TTL-free cache keyed by a composed request string
#[derive(Debug, Clone)]
pub struct FetchCache<T> {
    entries: Arc<RwLock<HashMap<String, FetchOutcome<T>>>>,
}

impl<T: Clone> FetchCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Composed key for a date-range fetch of the given kind
    pub fn key(kind: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!("{kind}|{start}|{end}")
    }

    pub fn get(&self, key: &str) -> Option<FetchOutcome<T>> {
        self.entries.read().get(key).cloned()
    }

    pub fn insert(&self, key: String, outcome: FetchOutcome<T>) {
        self.entries.write().insert(key, outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Clone> Default for FetchCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_key_composition() {
        let key = FetchCache::<u32>::key("daily", date("2026-03-01"), date("2026-03-31"));
        assert_eq!(key, "daily|2026-03-01|2026-03-31");
    }

    #[test]
    fn test_stores_success_and_failure() {
        let cache: FetchCache<u32> = FetchCache::new();
        cache.insert("a".into(), FetchOutcome::Success(vec![1]));
        cache.insert("b".into(), FetchOutcome::Failure("nope".into()));

        assert!(matches!(
            cache.get("a"),
            Some(FetchOutcome::Success(ref v)) if v == &vec![1]
        ));
        assert!(matches!(
            cache.get("b"),
            Some(FetchOutcome::Failure(ref m)) if m == "nope"
        ));
        assert!(cache.get("c").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let cache: FetchCache<u32> = FetchCache::new();
        cache.insert("a".into(), FetchOutcome::Failure("first".into()));
        cache.insert("a".into(), FetchOutcome::Success(vec![2]));

        assert!(matches!(cache.get("a"), Some(FetchOutcome::Success(_))));
        assert_eq!(cache.len(), 1);
    }
}
