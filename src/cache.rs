// src/cache.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Query results keyed by collection name or `collection/id`, served until
/// they are older than the freshness window. Errors are never stored.
pub struct QueryCache<T> {
    stale_after: Duration,
    entries: Mutex<HashMap<String, (Instant, Arc<T>)>>,
}

impl<T> QueryCache<T> {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A fresh entry, if there is one.
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<Arc<T>> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(key)
            .filter(|(stored, _)| now.saturating_duration_since(*stored) < self.stale_after)
            .map(|(_, value)| Arc::clone(value))
    }

    pub fn insert(&self, key: &str, value: T) -> Arc<T> {
        self.insert_at(key, value, Instant::now())
    }

    /// Store `value` and drop every entry that has gone stale by `now`, so
    /// keys that are never asked for again don't pile up.
    pub fn insert_at(&self, key: &str, value: T, now: Instant) -> Arc<T> {
        let value = Arc::new(value);
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|_, (stored, _)| now.saturating_duration_since(*stored) < self.stale_after);
            entries.insert(key.to_string(), (now, Arc::clone(&value)));
        }
        value
    }

    /// Entries held, fresh or not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve a fresh entry or run `fetch` and remember its success.
    pub fn get_or_fetch<E, F>(&self, key: &str, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(hit) = self.get(key) {
            tracing::debug!(key, "query cache hit");
            return Ok(hit);
        }
        let value = fetch()?;
        Ok(self.insert(key, value))
    }
}
