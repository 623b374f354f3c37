//! Background expiry sweeper.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::memory_store::InMemoryMetricsStore;

/// Spawns a task that purges expired entries from `store` every `interval`.
///
/// Lazy expiry on read already hides stale snapshots; the sweeper only
/// bounds memory held by users who stop producing events. Abort the returned
/// handle to stop it.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime, or if `interval` is zero.
pub fn spawn_expiry_sweeper(store: Arc<InMemoryMetricsStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                debug!(purged, remaining = store.len(), "purged expired metrics entries");
            }
        }
    })
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

    use super::spawn_expiry_sweeper;
    use crate::memory_store::InMemoryMetricsStore;

    #[tokio::test]
    async fn test_sweeper_purges_expired_entries() {
        // Arrange
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        let store = Arc::new(InMemoryMetricsStore::new(clock.clone()));
        store
            .put(UserId(1), MetricsSnapshot::zero(UserId(1)), Duration::from_secs(60))
            .await
            .unwrap();
        clock.advance(Duration::from_secs(61));

        // Act
        let handle = spawn_expiry_sweeper(store.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        // Assert
        assert!(store.is_empty());
    }
}
