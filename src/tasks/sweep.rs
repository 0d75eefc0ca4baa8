//! Background Sweep Task
//!
//! Periodic pass that removes stale cache entries, so keys written once and
//! never read again do not accumulate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the sweep loop for one cache instance.
///
/// Each tick acquires the write lock, removes every entry older than the
/// store's TTL with the same staleness rule the read path applies, and
/// releases the lock again. Callers of the cache are never blocked for
/// longer than that one critical section. The sweep itself never fails and
/// reports nothing; it is pure housekeeping.
///
/// The loop ends when `stop` is signalled or every sender is dropped.
///
/// # Arguments
/// * `store` - shared store to sweep
/// * `interval` - time between passes
/// * `stop` - shutdown signal observed between passes
pub fn spawn_sweep_task(
    store: Arc<RwLock<CacheStore>>,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(interval_ms = interval.as_millis() as u64, "sweep task started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let removed = {
                        let mut store = store.write().await;
                        store.sweep_expired()
                    };

                    if removed > 0 {
                        info!(removed, "sweep removed stale entries");
                    } else {
                        debug!("sweep found nothing stale");
                    }
                }
                _ = stop.changed() => {
                    debug!("sweep task stopping");
                    break;
                }
            }
        }
    })
}
