//! Short-lived cache for computed responses.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default lifetime of a cached response.
pub const DEFAULT_RESPONSE_TTL: Duration = Duration::from_secs(60);

/// A cached value.
#[derive(Debug, Clone)]
struct CachedResponse<T> {
    value: T,
    fetched_at: Instant,
}

/// Time-bounded cache keyed by [`cache_key`](super::cache_key).
///
/// Entries expire after the TTL. Keys embed the activity token, so stale
/// entries are never read after a write, they just age out.
#[derive(Debug)]
pub struct ResponseCache<T: Clone> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedResponse<T>>>,
}

impl<T: Clone> ResponseCache<T> {
    /// Create a cache whose entries live for `ttl`. A zero TTL disables it.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A fresh entry for the key, if any.
    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.value.clone())
    }

    /// Store a value and drop expired entries.
    pub fn insert(&self, key: String, value: T) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, cached| cached.fetched_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CachedResponse {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_TTL)
    }
}
