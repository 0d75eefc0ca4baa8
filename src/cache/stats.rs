//! Cache Statistics Module
//!
//! Tracks cache counters: hits, misses, and how entries were evicted.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache activity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a live entry
    pub hits: u64,
    /// Lookups that found nothing, or found only a stale entry
    pub misses: u64,
    /// Stale entries removed on the read path
    pub lazy_evictions: u64,
    /// Stale entries removed by the background sweep
    pub swept: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hits as a fraction of all lookups, or 0.0 if none have happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_lazy_eviction(&mut self) {
        self.lazy_evictions += 1;
    }

    pub(crate) fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }

    pub(crate) fn set_entries(&mut self, count: usize) {
        self.entries = count;
    }
}
