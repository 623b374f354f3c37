//! Transaction repository abstraction.

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::ids::UserId;

use super::transaction::{NewTransaction, Transaction};

/// Durable store of raw transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persists `transaction` and returns it with its assigned identifier.
    async fn save(&self, transaction: NewTransaction) -> Result<Transaction, DomainError>;

    /// Returns all transactions of `user_id` in recording order.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, DomainError>;
}
