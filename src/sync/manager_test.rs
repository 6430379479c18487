//! Tests for the sync orchestrator with a scripted broker.

use crate::broker::{BrokerActivity, BrokerHoldings, BrokerPosition, MockBroker};
use crate::db::utils::current_timestamp;
use crate::db::{
    AccountRepository, ActivityRepository, Database, ListQuery, PositionRepository,
    SqliteDatabase, SyncRun, SyncRunRepository, SyncRunStatus,
};
use crate::sync::SyncManager;

async fn accepted_run(db: &SqliteDatabase, run_id: &str) {
    db.sync_runs()
        .create(&SyncRun::started(run_id.to_string(), current_timestamp()))
        .await
        .unwrap();
}

fn broker_with_data() -> MockBroker {
    let mut broker = MockBroker::with_account("A1", "Main trading");
    broker.activities = vec![
        BrokerActivity {
            external_ref: Some("ext-1".to_string()),
            activity_type: Some("BUY".to_string()),
            symbol: Some("CRDB".to_string()),
            quantity: Some(100.0),
            amount: Some(53000.0),
            trade_date: Some("2025-02-10T00:00:00Z".to_string()),
            ..Default::default()
        },
        BrokerActivity {
            external_ref: Some("ext-2".to_string()),
            activity_type: Some("DIVIDEND".to_string()),
            symbol: Some("NMB".to_string()),
            amount: Some(1500.0),
            ..Default::default()
        },
    ];
    broker.holdings = BrokerHoldings {
        balances: vec![],
        positions: vec![
            BrokerPosition {
                symbol: Some("CRDB".to_string()),
                quantity: Some(100.0),
                price: Some(540.0),
                ..Default::default()
            },
            // No symbol: skipped, not stored.
            BrokerPosition {
                symbol: None,
                quantity: Some(5.0),
                ..Default::default()
            },
        ],
    };
    broker
}

#[tokio::test]
async fn run_pulls_accounts_activities_and_positions() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    accepted_run(&db, "run-1").await;

    let manager = SyncManager::new(broker_with_data());
    let summary = manager.run(&db, "run-1").await.unwrap();

    assert_eq!(summary.accounts, 1);
    assert_eq!(summary.activities, 2);
    assert_eq!(summary.positions, 1);
    assert_eq!(summary.total(), 4);

    let account = db.accounts().get("A1").await.unwrap();
    assert_eq!(account.name, "Main trading");
    assert_eq!(account.currency, "TZS");
    assert_eq!(account.institution, "DSE");

    let activities = db
        .activities()
        .list_paginated("A1", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(activities.total, 2);

    let positions = db.positions().list_by_account("A1").await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].symbol, "CRDB");

    let run = db.sync_runs().get("run-1").await.unwrap();
    assert_eq!(run.status, SyncRunStatus::Completed);
    assert_eq!(run.activities, 2);
    assert!(run.finished_at.is_some());
}

#[tokio::test]
async fn rerunning_converges_instead_of_duplicating() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let manager = SyncManager::new(broker_with_data());

    accepted_run(&db, "run-1").await;
    manager.run(&db, "run-1").await.unwrap();
    accepted_run(&db, "run-2").await;
    manager.run(&db, "run-2").await.unwrap();

    // Upserts and wholesale position replacement keep counts stable.
    let activities = db
        .activities()
        .list_paginated("A1", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(activities.total, 2);
    assert_eq!(db.positions().list_by_account("A1").await.unwrap().len(), 1);
    assert_eq!(db.accounts().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn broker_failure_marks_run_failed_with_message() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    accepted_run(&db, "run-1").await;

    let mut broker = MockBroker::with_account("A1", "Main trading");
    broker.fail_accounts = true;

    let manager = SyncManager::new(broker);
    let err = manager.run(&db, "run-1").await.unwrap_err();
    assert!(err.to_string().contains("broker unavailable"));

    let run = db.sync_runs().get("run-1").await.unwrap();
    assert_eq!(run.status, SyncRunStatus::Failed);
    assert!(
        run.message
            .as_deref()
            .is_some_and(|m| m.contains("broker unavailable")),
        "unexpected message: {:?}",
        run.message
    );
}

#[tokio::test]
async fn partial_failure_still_records_failed_run() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    accepted_run(&db, "run-1").await;

    let mut broker = broker_with_data();
    broker.fail_activities = true;

    let manager = SyncManager::new(broker);
    assert!(manager.run(&db, "run-1").await.is_err());

    // The account landed before the failure; the run is marked failed.
    assert!(db.accounts().get("A1").await.is_ok());
    let run = db.sync_runs().get("run-1").await.unwrap();
    assert_eq!(run.status, SyncRunStatus::Failed);
}

#[tokio::test]
async fn empty_broker_completes_with_zero_counts() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    accepted_run(&db, "run-1").await;

    let manager = SyncManager::new(MockBroker::empty());
    let summary = manager.run(&db, "run-1").await.unwrap();

    assert_eq!(summary.total(), 0);
    let run = db.sync_runs().get("run-1").await.unwrap();
    assert_eq!(run.status, SyncRunStatus::Completed);
}
