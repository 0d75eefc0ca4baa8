//! Property-Based Tests for the Cache
//!
//! Uses proptest to verify the store's contract over arbitrary keys,
//! payloads, and operation sequences.

use proptest::prelude::*;
use std::time::Duration;

use crate::cache::{Cache, CacheStore};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys, including the empty string, which is valid.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{0,32}".prop_map(|s| s)
}

/// Generates payloads of arbitrary bytes, including the empty payload.
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// A single cache operation for sequence testing.
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, payload: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), payload_strategy())
            .prop_map(|(key, payload)| CacheOp::Add { key, payload }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Round-trip: anything stored comes back byte-for-byte before the TTL,
    // for any key including "" and any payload including the empty one.
    #[test]
    fn prop_roundtrip(key in key_strategy(), payload in payload_strategy()) {
        let mut store = CacheStore::new(TEST_TTL);

        store.insert(key.clone(), payload.clone());

        prop_assert_eq!(store.lookup(&key), Some(payload));
    }

    // Overwrite: the second insert wins and the first payload is
    // unrecoverable.
    #[test]
    fn prop_overwrite_last_wins(
        key in key_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let mut store = CacheStore::new(TEST_TTL);

        store.insert(key.clone(), first);
        store.insert(key.clone(), second.clone());

        prop_assert_eq!(store.lookup(&key), Some(second));
        prop_assert_eq!(store.len(), 1);
    }

    // Keys that were never added always miss.
    #[test]
    fn prop_unknown_key_misses(key in key_strategy()) {
        let mut store = CacheStore::new(TEST_TTL);

        prop_assert_eq!(store.lookup(&key), None);
    }

    // With a zero TTL every lookup misses and lazily removes the entry, no
    // matter how recent the insert.
    #[test]
    fn prop_zero_ttl_always_misses(key in key_strategy(), payload in payload_strategy()) {
        let mut store = CacheStore::new(Duration::ZERO);

        store.insert(key.clone(), payload);

        prop_assert_eq!(store.lookup(&key), None);
        prop_assert_eq!(store.len(), 0);
    }

    // Counters track an arbitrary interleaving of adds and gets.
    #[test]
    fn prop_stats_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Add { key, payload } => store.insert(key, payload),
                CacheOp::Get { key } => match store.lookup(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.entries, store.len(), "Entries mismatch");
    }
}

// Separate block with fewer cases: each case spins up a runtime and a sweep
// task.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent adds and gets, racing an active sweep, leave the cache
    // consistent: no panics, no torn payloads, counters in range.
    #[test]
    fn prop_concurrent_ops_stay_consistent(
        ops in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        tokio_test::block_on(async {
            let cache = Cache::with_sweep_interval(TEST_TTL, Duration::from_millis(10));

            let mut handles = Vec::new();
            for op in ops {
                let cache = cache.clone();
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Add { key, payload } => cache.add(key, payload).await,
                        CacheOp::Get { key } => {
                            let _ = cache.get(&key).await;
                        }
                    }
                }));
            }

            for handle in handles {
                handle.await.expect("cache task should not panic");
            }

            let stats = cache.stats().await;
            assert_eq!(stats.entries, cache.len().await);
            let rate = stats.hit_rate();
            assert!((0.0..=1.0).contains(&rate), "hit rate out of range: {rate}");

            cache.shutdown().await;
        });
    }
}
