//! Test stores: mock `MetricsStore` implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::ids::UserId;
use nexusone_core::metrics::MetricsSnapshot;
use nexusone_core::store::MetricsStore;

/// A metrics store that always fails with `StoreUnavailable` and counts how
/// often it was called. Useful for testing error-handling paths.
#[derive(Debug, Default)]
pub struct FailingMetricsStore {
    calls: AtomicUsize,
}

impl FailingMetricsStore {
    /// Number of store operations attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::StoreUnavailable("connection refused".into()))
    }
}

#[async_trait]
impl MetricsStore for FailingMetricsStore {
    async fn get(&self, _user_id: UserId) -> Result<Option<MetricsSnapshot>, DomainError> {
        self.fail()
    }

    async fn put(
        &self,
        _user_id: UserId,
        _snapshot: MetricsSnapshot,
        _ttl: Duration,
    ) -> Result<(), DomainError> {
        self.fail()
    }

    async fn evict(&self, _user_id: UserId) -> Result<bool, DomainError> {
        self.fail()
    }
}
