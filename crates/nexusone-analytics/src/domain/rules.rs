//! Rules for folding domain events into a metrics snapshot.

use nexusone_core::error::DomainError;
use nexusone_core::event::DomainEventKind;
use nexusone_core::metrics::MetricsSnapshot;

/// Applies one event payload to `snapshot`.
///
/// Transactions add to income when the signed amount is zero or positive and
/// to expense (by magnitude) otherwise; task completions bump the counter.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a total would overflow; `snapshot`
/// is unchanged in that case.
pub fn apply(snapshot: &mut MetricsSnapshot, kind: &DomainEventKind) -> Result<(), DomainError> {
    match kind {
        DomainEventKind::TransactionRecorded(payload) => {
            snapshot.record_transaction(payload.signed_amount)
        }
        DomainEventKind::TaskCompleted(_) => {
            snapshot.record_task_completed();
            Ok(())
        }
    }
}
