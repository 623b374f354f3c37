//! Integration tests for dashboard aggregation.

mod common;

use std::time::Duration;

use nexusone_core::error::DomainError;
use nexusone_core::ids::{TaskId, UserId};
use nexusone_finance::domain::transaction::TransactionType;
use nexusone_task::domain::task::{TaskPriority, TaskStatus};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_income_and_expense_roll_up_into_dashboard() {
    // Arrange
    let state = common::build_state();
    let user = UserId(1);

    // Act
    state
        .record_transaction(user, Decimal::from(100), TransactionType::Income)
        .await
        .unwrap();
    state
        .record_transaction(user, Decimal::from(30), TransactionType::Expense)
        .await
        .unwrap();
    state.flush().await.unwrap();

    // Assert
    let view = state.dashboard(user).await.unwrap();
    assert_eq!(view.total_income, Decimal::from(100));
    assert_eq!(view.total_expense, Decimal::from(30));
    assert_eq!(view.net_balance, Decimal::from(70));
    assert_eq!(view.completed_task_count, 0);
    assert_eq!(state.list_transactions(user).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fractional_amounts_are_exact() {
    let state = common::build_state();
    let user = UserId(2);

    for _ in 0..10 {
        state
            .record_transaction(user, Decimal::new(10, 2), TransactionType::Income)
            .await
            .unwrap();
    }
    state.flush().await.unwrap();

    let view = state.dashboard(user).await.unwrap();
    assert_eq!(view.total_income, Decimal::ONE);
}

#[tokio::test]
async fn test_unknown_user_dashboard_is_zero() {
    let state = common::build_state();

    let view = state.dashboard(UserId(404)).await.unwrap();

    assert_eq!(view.total_income, Decimal::ZERO);
    assert_eq!(view.total_expense, Decimal::ZERO);
    assert_eq!(view.net_balance, Decimal::ZERO);
    assert_eq!(view.completed_task_count, 0);
}

#[tokio::test]
async fn test_users_do_not_share_metrics() {
    let state = common::build_state();

    state
        .record_transaction(UserId(1), Decimal::from(5), TransactionType::Income)
        .await
        .unwrap();
    state
        .record_transaction(UserId(2), Decimal::from(7), TransactionType::Expense)
        .await
        .unwrap();
    state.flush().await.unwrap();

    assert_eq!(
        state.dashboard(UserId(1)).await.unwrap().net_balance,
        Decimal::from(5)
    );
    assert_eq!(
        state.dashboard(UserId(2)).await.unwrap().net_balance,
        Decimal::from(-7)
    );
}

#[tokio::test]
async fn test_completed_tasks_are_counted_once() {
    // Arrange
    let state = common::build_state();
    let user = UserId(3);
    let first = state
        .create_task(user, "pay rent", None, TaskPriority::High)
        .await
        .unwrap();
    let second = state
        .create_task(user, "call bank", None, TaskPriority::default())
        .await
        .unwrap();

    // Act
    state.complete_task(first.id).await.unwrap();
    let again = state.complete_task(first.id).await;
    state.flush().await.unwrap();

    // Assert
    assert!(matches!(again, Err(DomainError::Validation(_))));
    assert_eq!(state.dashboard(user).await.unwrap().completed_task_count, 1);

    let statuses: Vec<TaskStatus> = state
        .list_tasks(user)
        .await
        .unwrap()
        .into_iter()
        .map(|task| task.status)
        .collect();
    assert_eq!(statuses, vec![TaskStatus::Completed, TaskStatus::Pending]);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_completing_unknown_task_is_not_found() {
    let state = common::build_state();

    let result = state.complete_task(TaskId(999)).await;

    assert!(matches!(result, Err(DomainError::NotFound { entity: "task", .. })));
}

#[tokio::test]
async fn test_expired_metrics_restart_from_zero() {
    // Arrange
    let (state, clock) = common::build_state_with_clock();
    let user = UserId(4);
    state
        .record_transaction(user, Decimal::from(50), TransactionType::Income)
        .await
        .unwrap();
    state.flush().await.unwrap();

    // Act
    clock.advance(Duration::from_secs(301));
    let expired = state.dashboard(user).await.unwrap();
    state
        .record_transaction(user, Decimal::from(8), TransactionType::Expense)
        .await
        .unwrap();
    state.flush().await.unwrap();

    // Assert
    assert_eq!(expired.total_income, Decimal::ZERO);
    let view = state.dashboard(user).await.unwrap();
    assert_eq!(view.total_income, Decimal::ZERO);
    assert_eq!(view.total_expense, Decimal::from(8));
    // The raw records are not part of the cache.
    assert_eq!(state.list_transactions(user).await.unwrap().len(), 2);
}
