//! Transaction entity for the Finance context.

use chrono::{DateTime, Utc};
use nexusone_core::ids::{TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

/// A transaction that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// The owning user.
    pub user_id: UserId,
    /// Non-negative magnitude of the transaction.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// When the transaction was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl NewTransaction {
    /// Builds a new transaction. The sign of `amount` is discarded; the
    /// direction comes from `transaction_type`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        amount: Decimal,
        transaction_type: TransactionType,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            amount: amount.abs(),
            transaction_type,
            recorded_at,
        }
    }
}

/// A persisted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Repository-assigned identifier.
    pub id: TransactionId,
    /// The owning user.
    pub user_id: UserId,
    /// Non-negative magnitude of the transaction.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// When the transaction was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Positive for income, negative for expense.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}
