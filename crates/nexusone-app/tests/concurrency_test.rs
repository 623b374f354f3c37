//! Integration tests for concurrent publication and handler isolation.

mod common;

use std::sync::Arc;

use nexusone_core::event::{DomainEventKind, EventType};
use nexusone_core::ids::UserId;
use nexusone_event_bus::EventHandler;
use nexusone_finance::domain::transaction::TransactionType;
use nexusone_task::domain::task::TaskPriority;
use nexusone_test_support::{PanickingHandler, RecordingHandler};
use rust_decimal::Decimal;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_for_one_user_are_not_lost() {
    // Arrange
    let state = common::build_state();
    let user = UserId(1);
    let mut publishers = Vec::new();

    // Act
    for i in 0..100_i64 {
        let state = state.clone();
        publishers.push(tokio::spawn(async move {
            let transaction_type = if i % 2 == 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            state
                .record_transaction(user, Decimal::from(i), transaction_type)
                .await
                .unwrap();
        }));
    }
    for publisher in publishers {
        publisher.await.unwrap();
    }
    state.flush().await.unwrap();

    // Assert
    let income: i64 = (0..100).filter(|i| i % 2 == 0).sum();
    let expense: i64 = (0..100).filter(|i| i % 2 == 1).sum();
    let view = state.dashboard(user).await.unwrap();
    assert_eq!(view.total_income, Decimal::from(income));
    assert_eq!(view.total_expense, Decimal::from(expense));
    assert_eq!(view.net_balance, Decimal::from(income - expense));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_users_aggregate_independently() {
    let state = common::build_state();
    let mut publishers = Vec::new();

    for user in 1..=20_i64 {
        let state = state.clone();
        publishers.push(tokio::spawn(async move {
            for _ in 0..user {
                state
                    .record_transaction(UserId(user), Decimal::ONE, TransactionType::Income)
                    .await
                    .unwrap();
            }
        }));
    }
    for publisher in publishers {
        publisher.await.unwrap();
    }
    state.flush().await.unwrap();

    for user in 1..=20_i64 {
        let view = state.dashboard(UserId(user)).await.unwrap();
        assert_eq!(view.total_income, Decimal::from(user), "user {user}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_completions_count_each_task_once() {
    // Arrange
    let state = common::build_state();
    let user = UserId(8);
    let mut task_ids = Vec::new();
    for i in 0..10 {
        let task = state
            .create_task(user, format!("task {i}"), None, TaskPriority::Low)
            .await
            .unwrap();
        task_ids.push(task.id);
    }

    // Act
    let mut attempts = Vec::new();
    for task_id in &task_ids {
        for _ in 0..6 {
            let state = state.clone();
            let task_id = *task_id;
            attempts.push(tokio::spawn(
                async move { state.complete_task(task_id).await },
            ));
        }
    }
    let mut succeeded = 0;
    for attempt in attempts {
        if attempt.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }
    state.flush().await.unwrap();

    // Assert
    assert_eq!(succeeded, task_ids.len());
    assert_eq!(
        state.dashboard(user).await.unwrap().completed_task_count,
        10
    );
    assert_eq!(state.event_bus.stats().published, 10);
}

#[tokio::test]
async fn test_panicking_subscriber_does_not_stop_aggregation() {
    // Arrange
    let state = common::build_state();
    state
        .event_bus
        .subscribe(
            EventType::TransactionRecorded,
            Arc::new(PanickingHandler) as Arc<dyn EventHandler>,
        )
        .unwrap();
    let user = UserId(6);

    // Act
    for _ in 0..3 {
        state
            .record_transaction(user, Decimal::from(10), TransactionType::Income)
            .await
            .unwrap();
    }
    state.flush().await.unwrap();

    // Assert
    assert_eq!(
        state.dashboard(user).await.unwrap().total_income,
        Decimal::from(30)
    );
    let stats = state.event_bus.stats();
    assert_eq!(stats.published, 3);
    assert_eq!(stats.panicked, 3);
    assert_eq!(stats.delivered, 3);
}

#[tokio::test]
async fn test_extra_subscriber_sees_events_in_publish_order() {
    let state = common::build_state();
    let recorder = Arc::new(RecordingHandler::default());
    state
        .event_bus
        .subscribe(
            EventType::TransactionRecorded,
            Arc::clone(&recorder) as Arc<dyn EventHandler>,
        )
        .unwrap();

    for amount in 1..=5 {
        state
            .record_transaction(UserId(1), Decimal::from(amount), TransactionType::Income)
            .await
            .unwrap();
    }
    state.flush().await.unwrap();

    let amounts: Vec<String> = recorder
        .received_events()
        .iter()
        .map(|event| match &event.kind {
            DomainEventKind::TransactionRecorded(payload) => {
                payload.signed_amount.to_string()
            }
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(amounts, vec!["1", "2", "3", "4", "5"]);
}
