//! Command handlers for the Finance context.
//!
//! Each handler persists the raw record first and then announces it to the
//! aggregation core. Analytics is a best-effort cache, so a publication
//! failure is logged and does not fail the command.

use nexusone_core::clock::Clock;
use nexusone_core::error::DomainError;
use nexusone_core::event::DomainEvent;
use nexusone_core::publisher::EventPublisher;
use tracing::{info, warn};

use crate::domain::commands::RecordTransaction;
use crate::domain::repository::TransactionRepository;
use crate::domain::transaction::{NewTransaction, Transaction};

/// Handles the `RecordTransaction` command: persists the transaction and
/// publishes `TransactionRecorded` with its signed amount.
///
/// # Errors
///
/// Returns `DomainError` if the transaction cannot be persisted.
pub async fn handle_record_transaction(
    command: &RecordTransaction,
    clock: &dyn Clock,
    repo: &dyn TransactionRepository,
    publisher: &dyn EventPublisher,
) -> Result<Transaction, DomainError> {
    let draft = NewTransaction::new(
        command.user_id,
        command.amount,
        command.transaction_type,
        clock.now(),
    );
    let transaction = repo.save(draft).await?;

    info!(
        transaction_id = %transaction.id,
        user_id = %transaction.user_id,
        correlation_id = %command.correlation_id,
        "transaction recorded"
    );

    let event = DomainEvent::transaction_recorded(
        transaction.user_id,
        transaction.signed_amount(),
        command.correlation_id,
        clock,
    );
    if let Err(err) = publisher.publish(event).await {
        warn!(
            transaction_id = %transaction.id,
            error = %err,
            "failed to publish transaction event; dashboard metrics will lag"
        );
    }

    Ok(transaction)
}
