//! Commands for the Finance context.

use nexusone_core::ids::UserId;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::transaction::TransactionType;

/// Command to record a transaction for a user.
#[derive(Debug, Clone)]
pub struct RecordTransaction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning user.
    pub user_id: UserId,
    /// Transaction amount; only its magnitude is used.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: TransactionType,
}
