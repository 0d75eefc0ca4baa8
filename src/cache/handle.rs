//! Cache Handle Module
//!
//! The concurrent face of the cache: a cloneable handle sharing one store
//! behind a reader/writer lock, plus ownership of the background sweep task
//! for that store. `shutdown` signals the task and joins it; if the last
//! clone is dropped without a shutdown, the task is aborted instead so
//! short-lived processes and tests do not leak background work.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::spawn_sweep_task;

/// Default period of the background sweep, independent of the TTL.
///
/// A TTL shorter than this is legal; such entries are usually caught by the
/// lazy path before the sweep ever sees them.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

// == Cache ==
/// Concurrency-safe TTL cache.
///
/// Clones share the same store and the same sweep task. `add` and `get` may
/// be called from any number of tasks at any time; every critical section is
/// bounded by the cost of a map operation, never by I/O.
#[derive(Clone)]
pub struct Cache {
    store: Arc<RwLock<CacheStore>>,
    sweeper: Arc<Sweeper>,
}

/// Owns the sweep task for one cache instance.
struct Sweeper {
    stop: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache whose entries live for `ttl` and starts its sweep
    /// task at [`DEFAULT_SWEEP_INTERVAL`].
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a cache with an explicit sweep period.
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(ttl)));
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store.clone(), sweep_interval, stop_rx);

        Self {
            store,
            sweeper: Arc::new(Sweeper {
                stop: stop_tx,
                handle: Mutex::new(Some(handle)),
            }),
        }
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`. Never fails; empty keys
    /// and empty payloads are valid.
    pub async fn add(&self, key: impl Into<String>, payload: Vec<u8>) {
        self.store.write().await.insert(key.into(), payload);
    }

    // == Get ==
    /// Returns a copy of the payload for `key` if a live entry exists,
    /// `None` if the key is absent or its entry has outlived the TTL.
    ///
    /// A stale entry is evicted on the spot, which makes this a write: it
    /// takes the write lock rather than racing the sweep from a read-locked
    /// fast path.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.write().await.lookup(key)
    }

    // == Length ==
    /// Current number of entries in the store.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Stats ==
    /// Snapshot of the activity counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Shutdown ==
    /// Stops the sweep task and waits for it to finish.
    ///
    /// Any clone may call this; later calls are no-ops.
    pub async fn shutdown(&self) {
        let _ = self.sweeper.stop.send(true);
        if let Some(handle) = self.sweeper.handle.lock().await.take() {
            let _ = handle.await;
            debug!("sweep task joined");
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        // Last handle gone without a shutdown call: don't leave the task
        // running for the rest of the process.
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}
