//! Cache Entry Module
//!
//! Defines the record stored per key: an opaque payload plus its creation time.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: opaque bytes and the instant they were stored.
///
/// Payload and timestamp always travel together. An overwrite replaces the
/// whole record, so a reader can never observe bytes from one insert paired
/// with the timestamp of another.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes; the cache never interprets them
    pub payload: Vec<u8>,
    /// When this entry was inserted
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
        }
    }

    // == Is Stale ==
    /// Checks whether this entry has outlived `ttl`.
    ///
    /// The comparison is strict: an entry whose age equals `ttl` exactly is
    /// still live. A zero `ttl` marks every entry stale on its first check,
    /// so a lookup immediately after an insert is a deterministic miss
    /// rather than a race against the clock.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        ttl.is_zero() || self.created_at.elapsed() > ttl
    }

    // == Age ==
    /// Time elapsed since this entry was inserted.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
