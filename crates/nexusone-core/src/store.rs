//! Metrics store abstraction.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::ids::UserId;
use crate::metrics::MetricsSnapshot;

/// Time-to-live applied to dashboard entries unless configured otherwise.
pub const DEFAULT_METRICS_TTL: Duration = Duration::from_secs(5 * 60);

/// Key-value store of per-user metrics snapshots with a time-to-live per
/// entry.
///
/// A user's entry is either absent or present until its deadline passes (or
/// it is evicted). Writes are last-writer-wins; callers that need
/// read-modify-write atomicity must serialize updates per user themselves.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Returns the snapshot for `user_id` if present and not expired.
    async fn get(&self, user_id: UserId) -> Result<Option<MetricsSnapshot>, DomainError>;

    /// Stores or overwrites the snapshot for `user_id`, expiring after `ttl`.
    async fn put(
        &self,
        user_id: UserId,
        snapshot: MetricsSnapshot,
        ttl: Duration,
    ) -> Result<(), DomainError>;

    /// Removes the entry for `user_id`. Returns `true` if a live entry was
    /// removed.
    async fn evict(&self, user_id: UserId) -> Result<bool, DomainError>;

    /// Returns the snapshot for `user_id`, or a zero-valued snapshot when the
    /// user has no live entry.
    async fn query(&self, user_id: UserId) -> Result<MetricsSnapshot, DomainError> {
        Ok(self
            .get(user_id)
            .await?
            .unwrap_or_else(|| MetricsSnapshot::zero(user_id)))
    }
}
