//! Query handlers for the Finance context.

use chrono::{DateTime, Utc};
use nexusone_core::error::DomainError;
use nexusone_core::ids::{TransactionId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::repository::TransactionRepository;
use crate::domain::transaction::TransactionType;

/// Read-only view of a recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    /// The transaction identifier.
    pub id: TransactionId,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// When it was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Lists the transactions recorded for `user_id`, oldest first.
///
/// # Errors
///
/// Returns `DomainError` if the repository cannot be read.
pub async fn list_transactions_for_user(
    user_id: UserId,
    repo: &dyn TransactionRepository,
) -> Result<Vec<TransactionView>, DomainError> {
    let transactions = repo.find_by_user(user_id).await?;
    Ok(transactions
        .into_iter()
        .map(|transaction| TransactionView {
            id: transaction.id,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            recorded_at: transaction.recorded_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use nexusone_core::ids::UserId;
    use rust_decimal::Decimal;

    use crate::application::query_handlers::list_transactions_for_user;
    use crate::domain::repository::TransactionRepository;
    use crate::domain::transaction::{NewTransaction, TransactionType};
    use crate::infrastructure::in_memory::InMemoryTransactionRepository;

    #[tokio::test]
    async fn test_lists_only_the_users_transactions() {
        // Arrange
        let repo = InMemoryTransactionRepository::new();
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        repo.save(NewTransaction::new(UserId(1), Decimal::from(10), TransactionType::Income, now))
            .await
            .unwrap();
        repo.save(NewTransaction::new(UserId(2), Decimal::from(99), TransactionType::Expense, now))
            .await
            .unwrap();

        // Act
        let views = list_transactions_for_user(UserId(1), &repo).await.unwrap();

        // Assert
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].amount, Decimal::from(10));
        assert_eq!(views[0].transaction_type, TransactionType::Income);
    }

    #[tokio::test]
    async fn test_user_without_transactions_gets_empty_list() {
        let repo = InMemoryTransactionRepository::new();

        let views = list_transactions_for_user(UserId(7), &repo).await.unwrap();

        assert!(views.is_empty());
    }
}
