//! Aggregated per-user metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::UserId;

/// Aggregated metrics for one user at one point in time.
///
/// Totals are kept as magnitudes: `total_income` and `total_expense` are
/// never negative, and `completed_task_count` only grows for as long as the
/// snapshot lives in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// The user these metrics describe.
    pub user_id: UserId,
    /// Sum of all non-negative transaction amounts.
    pub total_income: Decimal,
    /// Sum of the absolute values of all negative transaction amounts.
    pub total_expense: Decimal,
    /// Number of completed tasks observed.
    pub completed_task_count: u64,
}

impl MetricsSnapshot {
    /// Returns the zero-valued snapshot for a user with no recorded activity.
    #[must_use]
    pub fn zero(user_id: UserId) -> Self {
        Self {
            user_id,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            completed_task_count: 0,
        }
    }

    /// Folds a signed transaction amount into the totals. Zero counts as
    /// income.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the affected total would exceed
    /// the representable decimal range. The snapshot is left unchanged.
    pub fn record_transaction(&mut self, signed_amount: Decimal) -> Result<(), DomainError> {
        let user_id = self.user_id;
        // abs() also normalizes a negative zero.
        let magnitude = signed_amount.abs();
        let (total, label) = if signed_amount < Decimal::ZERO {
            (&mut self.total_expense, "expense")
        } else {
            (&mut self.total_income, "income")
        };
        *total = total.checked_add(magnitude).ok_or_else(|| {
            DomainError::Validation(format!("{label} total overflow for user {user_id}"))
        })?;
        Ok(())
    }

    /// Counts one more completed task.
    pub fn record_task_completed(&mut self) {
        self.completed_task_count = self.completed_task_count.saturating_add(1);
    }

    /// Income minus expense.
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}
