//! Time-expiring profile cache keyed by normalized URL.
//!
//! The cache is a plain in-memory data structure with no I/O. Entries expire
//! lazily: an entry older than the TTL is removed on the first read that
//! observes it, not by a background sweeper. The clock is injectable so TTL
//! boundaries can be tested without sleeping.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use sitelens_core::BusinessProfile;

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A stored profile plus the clock time it was written. Owned exclusively by
/// the cache and never handed out.
struct CacheEntry {
    data: BusinessProfile,
    stored_at: DateTime<Utc>,
}

/// Thread-safe TTL cache for [`BusinessProfile`] records.
///
/// All methods take `&self`; interior mutability is a `std::sync::Mutex`
/// held only for the duration of one map operation, never across an await
/// point. An entry observable via [`ProfileCache::get`] is never older than
/// the configured TTL.
pub struct ProfileCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Clock,
}

impl ProfileCache {
    /// Creates a cache with the given TTL, reading time from `Utc::now`.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_clock(ttl_secs, Box::new(Utc::now))
    }

    /// Creates a cache with an injected clock. Used by tests to step time
    /// across the TTL boundary deterministically.
    #[must_use]
    pub fn with_clock(ttl_secs: u64, clock: Clock) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
            clock,
        }
    }

    /// Stores `value` under `key` with the current clock time, overwriting
    /// any prior entry.
    pub fn set(&self, key: &str, value: BusinessProfile) {
        let stored_at = (self.clock)();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key.to_owned(),
            CacheEntry {
                data: value,
                stored_at,
            },
        );
    }

    /// Returns the stored profile if present and younger than the TTL.
    ///
    /// An expired entry is evicted on this read and `None` is returned.
    pub fn get(&self, key: &str) -> Option<BusinessProfile> {
        let now = (self.clock)();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => now - entry.stored_at > self.ttl,
        };

        if expired {
            entries.remove(key);
            tracing::debug!(cache_key = key, "evicted expired cache entry");
            return None;
        }

        entries.get(key).map(|entry| entry.data.clone())
    }

    /// Whether a live (non-expired) entry exists for `key`. Shares `get`'s
    /// lazy-eviction side effect.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.clear();
    }
}
