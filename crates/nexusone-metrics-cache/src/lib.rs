//! NexusOne metrics cache.
//!
//! Provides the in-memory, TTL-bounded implementation of
//! [`nexusone_core::store::MetricsStore`] and the background task that
//! purges expired entries.

pub mod memory_store;
pub mod sweeper;
