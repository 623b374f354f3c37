//! In-memory implementation of the `MetricsStore` trait.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::trace;

use nexusone_core::clock::Clock;
use nexusone_core::error::DomainError;
use nexusone_core::ids::UserId;
use nexusone_core::metrics::MetricsSnapshot;
use nexusone_core::store::MetricsStore;

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: MetricsSnapshot,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Concurrent, TTL-bounded metrics store held in process memory.
///
/// Each user key is an independent shard entry, so reads and writes for
/// different users never contend on a shared lock. Expired entries are
/// dropped lazily on read and in bulk by [`InMemoryMetricsStore::purge_expired`].
pub struct InMemoryMetricsStore {
    entries: DashMap<UserId, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMetricsStore {
    /// Creates an empty store whose deadlines are computed from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of entries held, including expired entries not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }
}

impl fmt::Debug for InMemoryMetricsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryMetricsStore")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetricsStore for InMemoryMetricsStore {
    async fn get(&self, user_id: UserId) -> Result<Option<MetricsSnapshot>, DomainError> {
        let now = self.clock.now();
        let lookup = self
            .entries
            .get(&user_id)
            .map(|entry| entry.is_live(now).then(|| entry.snapshot.clone()));

        match lookup {
            None => Ok(None),
            Some(Some(snapshot)) => Ok(Some(snapshot)),
            Some(None) => {
                // A concurrent put may have refreshed the entry in between.
                self.entries
                    .remove_if(&user_id, |_, entry| !entry.is_live(now));
                trace!(%user_id, "metrics entry expired");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        user_id: UserId,
        snapshot: MetricsSnapshot,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        let expires_at = self.clock.deadline_after(ttl);
        self.entries.insert(
            user_id,
            CacheEntry {
                snapshot,
                expires_at,
            },
        );
        trace!(%user_id, %expires_at, "metrics entry stored");
        Ok(())
    }

    async fn evict(&self, user_id: UserId) -> Result<bool, DomainError> {
        let now = self.clock.now();
        Ok(self
            .entries
            .remove(&user_id)
            .is_some_and(|(_, entry)| entry.is_live(now)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use nexusone_core::ids::UserId;
    use nexusone_core::metrics::MetricsSnapshot;
    use nexusone_core::store::MetricsStore;
    use nexusone_test_support::ManualClock;
    use rust_decimal::Decimal;

    use super::InMemoryMetricsStore;

    const TTL: Duration = Duration::from_secs(300);

    fn manual_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ))
    }

    fn snapshot_with_income(user_id: UserId, income: i64) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::zero(user_id);
        snapshot.record_transaction(Decimal::from(income)).unwrap();
        snapshot
    }

    #[tokio::test]
    async fn test_get_returns_none_for_unknown_user() {
        let store = InMemoryMetricsStore::new(manual_clock());

        let result = store.get(UserId(1)).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_returns_snapshot() {
        // Arrange
        let store = InMemoryMetricsStore::new(manual_clock());
        let snapshot = snapshot_with_income(UserId(1), 100);

        // Act
        store.put(UserId(1), snapshot.clone(), TTL).await.unwrap();
        let result = store.get(UserId(1)).await.unwrap();

        // Assert
        assert_eq!(result, Some(snapshot));
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_snapshot() {
        let store = InMemoryMetricsStore::new(manual_clock());
        store
            .put(UserId(1), snapshot_with_income(UserId(1), 10), TTL)
            .await
            .unwrap();

        store
            .put(UserId(1), snapshot_with_income(UserId(1), 20), TTL)
            .await
            .unwrap();

        let result = store.get(UserId(1)).await.unwrap().unwrap();
        assert_eq!(result.total_income, Decimal::from(20));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_entry_expires_at_deadline() {
        // Arrange
        let clock = manual_clock();
        let store = InMemoryMetricsStore::new(clock.clone());
        store
            .put(UserId(1), snapshot_with_income(UserId(1), 100), TTL)
            .await
            .unwrap();

        // Act
        clock.advance(Duration::from_secs(299));
        let before_deadline = store.get(UserId(1)).await.unwrap();
        clock.advance(Duration::from_secs(1));
        let at_deadline = store.get(UserId(1)).await.unwrap();

        // Assert
        assert!(before_deadline.is_some());
        assert!(at_deadline.is_none());
        assert!(store.is_empty(), "expired entry should be dropped on read");
    }

    #[tokio::test]
    async fn test_deadline_is_compared_to_wall_clock_time() {
        // Arrange
        let clock = manual_clock();
        let store = InMemoryMetricsStore::new(clock.clone());
        store
            .put(UserId(1), snapshot_with_income(UserId(1), 100), TTL)
            .await
            .unwrap();

        // Act
        clock.set(Utc.with_ymd_and_hms(2026, 1, 15, 10, 4, 59).unwrap());
        let before_deadline = store.get(UserId(1)).await.unwrap();
        clock.set(Utc.with_ymd_and_hms(2026, 1, 16, 9, 0, 0).unwrap());
        let next_day = store.get(UserId(1)).await.unwrap();

        // Assert
        assert!(before_deadline.is_some());
        assert!(next_day.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_refreshes_deadline() {
        let clock = manual_clock();
        let store = InMemoryMetricsStore::new(clock.clone());
        store
            .put(UserId(1), snapshot_with_income(UserId(1), 1), TTL)
            .await
            .unwrap();

        clock.advance(Duration::from_secs(200));
        store
            .put(UserId(1), snapshot_with_income(UserId(1), 2), TTL)
            .await
            .unwrap();
        clock.advance(Duration::from_secs(200));

        assert!(store.get(UserId(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_query_returns_zero_after_expiry() {
        let clock = manual_clock();
        let store = InMemoryMetricsStore::new(clock.clone());
        store
            .put(UserId(4), snapshot_with_income(UserId(4), 50), TTL)
            .await
            .unwrap();

        clock.advance(TTL);

        let snapshot = store.query(UserId(4)).await.unwrap();
        assert_eq!(snapshot, MetricsSnapshot::zero(UserId(4)));
    }

    #[tokio::test]
    async fn test_evict_reports_whether_live_entry_was_removed() {
        let clock = manual_clock();
        let store = InMemoryMetricsStore::new(clock.clone());
        store
            .put(UserId(1), MetricsSnapshot::zero(UserId(1)), TTL)
            .await
            .unwrap();
        store
            .put(UserId(2), MetricsSnapshot::zero(UserId(2)), Duration::from_secs(1))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(5));

        assert!(store.evict(UserId(1)).await.unwrap());
        assert!(!store.evict(UserId(2)).await.unwrap());
        assert!(!store.evict(UserId(3)).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired_removes_only_expired_entries() {
        // Arrange
        let clock = manual_clock();
        let store = InMemoryMetricsStore::new(clock.clone());
        store
            .put(UserId(1), MetricsSnapshot::zero(UserId(1)), Duration::from_secs(10))
            .await
            .unwrap();
        store
            .put(UserId(2), MetricsSnapshot::zero(UserId(2)), Duration::from_secs(10))
            .await
            .unwrap();
        store
            .put(UserId(3), MetricsSnapshot::zero(UserId(3)), TTL)
            .await
            .unwrap();

        // Act
        clock.advance(Duration::from_secs(10));
        let purged = store.purge_expired();

        // Assert
        assert_eq!(purged, 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(UserId(3)).await.unwrap().is_some());
    }
}
