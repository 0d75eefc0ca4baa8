//! Background Tasks Module
//!
//! Tasks that run on their own schedule for the lifetime of a cache
//! instance.
//!
//! # Tasks
//! - Sweep: removes stale cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
