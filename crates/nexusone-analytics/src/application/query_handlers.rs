//! Query handlers for the Analytics context.

use nexusone_core::error::DomainError;
use nexusone_core::ids::UserId;
use nexusone_core::store::MetricsStore;
use rust_decimal::Decimal;
use serde::Serialize;

/// Read-only view of a user's dashboard metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// The user the metrics belong to.
    pub user_id: UserId,
    /// Sum of income amounts.
    pub total_income: Decimal,
    /// Sum of expense magnitudes.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub net_balance: Decimal,
    /// Number of completed tasks.
    pub completed_task_count: u64,
}

/// Returns the dashboard metrics for `user_id`. Users with no recorded
/// activity (or whose cached metrics expired) get a zero-valued view.
///
/// # Errors
///
/// Returns `DomainError::StoreUnavailable` if the metrics store cannot be
/// read.
pub async fn get_dashboard_metrics(
    user_id: UserId,
    store: &dyn MetricsStore,
) -> Result<DashboardView, DomainError> {
    let snapshot = store.query(user_id).await?;
    Ok(DashboardView {
        user_id,
        net_balance: snapshot.net_balance(),
        total_income: snapshot.total_income,
        total_expense: snapshot.total_expense,
        completed_task_count: snapshot.completed_task_count,
    })
}
