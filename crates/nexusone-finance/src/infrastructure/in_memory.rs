//! In-memory `TransactionRepository`.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::ids::{TransactionId, UserId};

use crate::domain::repository::TransactionRepository;
use crate::domain::transaction::{NewTransaction, Transaction};

/// Process-local transaction store. Identifiers start at 1.
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn save(&self, transaction: NewTransaction) -> Result<Transaction, DomainError> {
        let mut transactions = self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let next_id = i64::try_from(transactions.len())
            .map_err(|e| DomainError::Infrastructure(format!("transaction id overflow: {e}")))?
            + 1;

        let saved = Transaction {
            id: TransactionId(next_id),
            user_id: transaction.user_id,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            recorded_at: transaction.recorded_at,
        };
        transactions.push(saved.clone());
        Ok(saved)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, DomainError> {
        Ok(self
            .transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect())
    }
}
