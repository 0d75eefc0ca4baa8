//! Cache Store Module
//!
//! Single-threaded cache engine: the key/entry map, the instance-wide TTL,
//! and the staleness bookkeeping. Concurrent access and the background sweep
//! are layered on top by `Cache`.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-to-entry storage with one fixed TTL for the whole instance.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage; the store exclusively owns every entry
    entries: HashMap<String, CacheEntry>,
    /// Maximum age an entry may reach before it stops being returned
    ttl: Duration,
    /// Activity counters, updated under the same lock as the data
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    // == Insert ==
    /// Inserts or overwrites the entry for `key`, stamping it with the
    /// current time.
    ///
    /// Total over its inputs: any key and any payload are storable,
    /// including empty ones. An overwrite replaces value and timestamp
    /// together; the previous entry is unrecoverable.
    pub fn insert(&mut self, key: String, payload: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(payload));
        self.stats.set_entries(self.entries.len());
    }

    // == Lookup ==
    /// Returns a copy of the payload for `key` if a live entry exists.
    ///
    /// A stale entry found here is removed before the miss is reported, so
    /// this is a mutation disguised as a read. The caller must hold
    /// exclusive access; see `Cache::get`.
    pub fn lookup(&mut self, key: &str) -> Option<Vec<u8>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_stale(self.ttl) {
                self.entries.remove(key);
                self.stats.record_lazy_eviction();
                self.stats.record_miss();
                self.stats.set_entries(self.entries.len());
                return None;
            }

            let payload = entry.payload.clone();
            self.stats.record_hit();
            Some(payload)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Sweep Expired ==
    /// Removes every stale entry, using the same staleness rule as
    /// `lookup`. Returns how many entries were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_stale(ttl));

        let removed = before - self.entries.len();
        self.stats.record_swept(removed);
        self.stats.set_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len());
        stats
    }

    // == TTL ==
    /// The fixed TTL this store was created with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Current number of entries, live or not yet noticed as stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.ttl(), TTL);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = CacheStore::new(TTL);

        store.insert("key1".to_string(), b"value1".to_vec());

        assert_eq!(store.lookup("key1"), Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_unknown_key() {
        let mut store = CacheStore::new(TTL);

        assert_eq!(store.lookup("nonexistent"), None);
    }

    #[test]
    fn test_empty_key_and_empty_payload_are_valid() {
        let mut store = CacheStore::new(TTL);

        store.insert(String::new(), Vec::new());

        // An empty payload is a stored value, distinct from "not found".
        assert_eq!(store.lookup(""), Some(Vec::new()));
        assert_eq!(store.lookup("missing"), None);
    }

    #[test]
    fn test_overwrite_replaces_entry_wholesale() {
        let mut store = CacheStore::new(TTL);

        store.insert("key1".to_string(), b"first".to_vec());
        store.insert("key1".to_string(), b"second".to_vec());

        assert_eq!(store.lookup("key1"), Some(b"second".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_evicts_stale_entry() {
        let mut store = CacheStore::new(Duration::from_millis(20));

        store.insert("key1".to_string(), b"value1".to_vec());
        assert_eq!(store.len(), 1);

        sleep(Duration::from_millis(40));

        // The miss itself removes the entry from storage.
        assert_eq!(store.lookup("key1"), None);
        assert_eq!(store.len(), 0);

        let stats = store.stats();
        assert_eq!(stats.lazy_evictions, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_lookup_before_ttl_hits() {
        let mut store = CacheStore::new(Duration::from_millis(80));

        store.insert("key1".to_string(), b"value1".to_vec());
        sleep(Duration::from_millis(10));

        assert_eq!(store.lookup("key1"), Some(b"value1".to_vec()));
    }

    #[test]
    fn test_sweep_expired_removes_only_stale_entries() {
        let mut store = CacheStore::new(Duration::from_millis(30));

        store.insert("old".to_string(), b"value".to_vec());
        sleep(Duration::from_millis(50));
        store.insert("fresh".to_string(), b"value".to_vec());

        let removed = store.sweep_expired();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("fresh"), Some(b"value".to_vec()));
        assert_eq!(store.stats().swept, 1);
    }

    #[test]
    fn test_sweep_on_empty_store() {
        let mut store = CacheStore::new(TTL);
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn test_zero_ttl_always_misses() {
        let mut store = CacheStore::new(Duration::ZERO);

        store.insert("key1".to_string(), b"value1".to_vec());

        // With a zero TTL the entry is stale the instant it is checked.
        assert_eq!(store.lookup("key1"), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_zero_ttl_sweep_drops_everything() {
        let mut store = CacheStore::new(Duration::ZERO);

        store.insert("a".to_string(), b"1".to_vec());
        store.insert("b".to_string(), b"2".to_vec());

        assert_eq!(store.sweep_expired(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let mut store = CacheStore::new(TTL);

        store.insert("key1".to_string(), b"value1".to_vec());
        store.lookup("key1");
        store.lookup("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }
}
