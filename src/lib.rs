//! Fetchcache - a TTL-cached HTTP fetch layer
//!
//! An in-memory byte cache with a single fixed TTL per instance and a
//! background sweep, plus a thin HTTP client that consults the cache before
//! touching the network and an interactive loop on top of both.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod repl;
pub mod tasks;

pub use cache::{Cache, CacheStats, DEFAULT_SWEEP_INTERVAL};
pub use client::CachedClient;
pub use config::Config;
pub use error::{FetchError, Result};
pub use tasks::spawn_sweep_task;
