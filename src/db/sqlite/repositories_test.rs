//! Repository tests against an in-memory database.

use crate::db::utils::current_timestamp;
use crate::db::{
    Account, AccountRepository, Activity, ActivityRepository, Database, DbError, ListQuery,
    Position, PositionRepository, SortOrder, SqliteDatabase, SyncRun, SyncRunRepository,
    SyncRunStatus,
};

async fn test_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db
}

fn sample_account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        name: format!("Account {}", id),
        account_number: Some("CDS-12345".to_string()),
        currency: "TZS".to_string(),
        status: Some("active".to_string()),
        institution: "DSE".to_string(),
        ..Default::default()
    }
}

fn sample_activity(account_id: &str, external_ref: Option<&str>) -> Activity {
    Activity {
        account_id: account_id.to_string(),
        external_ref: external_ref.map(String::from),
        activity_type: "BUY".to_string(),
        symbol: Some("CRDB".to_string()),
        symbol_name: Some("CRDB Bank".to_string()),
        quantity: Some(100.0),
        price: Some(530.0),
        amount: Some(53000.0),
        fee: Some(120.0),
        currency: Some("TZS".to_string()),
        trade_date: Some("2025-02-10T00:00:00Z".to_string()),
        ..Default::default()
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn account_upsert_inserts_then_updates() {
    let db = test_db().await;

    let created = db.accounts().upsert(&sample_account("A1")).await.unwrap();
    assert_eq!(created.id, "A1");
    assert_eq!(created.institution, "DSE");

    let mut changed = sample_account("A1");
    changed.name = "Renamed".to_string();
    changed.status = Some("closed".to_string());
    let updated = db.accounts().upsert(&changed).await.unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.status.as_deref(), Some("closed"));
    assert_eq!(db.accounts().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn account_get_missing_is_not_found() {
    let db = test_db().await;

    let err = db.accounts().get("nope").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
async fn account_list_orders_by_name() {
    let db = test_db().await;

    let mut b = sample_account("B1");
    b.name = "Zanaki".to_string();
    let mut a = sample_account("A1");
    a.name = "Askari".to_string();

    db.accounts().upsert(&b).await.unwrap();
    db.accounts().upsert(&a).await.unwrap();

    let names: Vec<String> = db
        .accounts()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Askari", "Zanaki"]);
}

// =============================================================================
// Activities
// =============================================================================

#[tokio::test]
async fn activity_upsert_by_external_ref_does_not_duplicate() {
    let db = test_db().await;
    db.accounts().upsert(&sample_account("A1")).await.unwrap();

    let first = db
        .activities()
        .upsert(&sample_activity("A1", Some("ext-1")))
        .await
        .unwrap();

    let mut changed = sample_activity("A1", Some("ext-1"));
    changed.amount = Some(99999.0);
    let second = db.activities().upsert(&changed).await.unwrap();

    // Same stored row, updated in place.
    assert_eq!(first.id, second.id);
    assert_eq!(second.amount, Some(99999.0));

    let page = db
        .activities()
        .list_paginated("A1", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn activities_without_external_ref_always_insert() {
    let db = test_db().await;
    db.accounts().upsert(&sample_account("A1")).await.unwrap();

    db.activities()
        .upsert(&sample_activity("A1", None))
        .await
        .unwrap();
    db.activities()
        .upsert(&sample_activity("A1", None))
        .await
        .unwrap();

    let page = db
        .activities()
        .list_paginated("A1", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn activity_pagination_and_sorting() {
    let db = test_db().await;
    db.accounts().upsert(&sample_account("A1")).await.unwrap();

    for (i, date) in ["2025-01-01", "2025-01-03", "2025-01-02"].iter().enumerate() {
        let mut activity = sample_activity("A1", Some(&format!("ext-{}", i)));
        activity.trade_date = Some(format!("{}T00:00:00Z", date));
        db.activities().upsert(&activity).await.unwrap();
    }

    let query = ListQuery {
        limit: Some(2),
        offset: Some(0),
        sort_by: Some("trade_date".to_string()),
        sort_order: Some(SortOrder::Desc),
    };
    let page = db.activities().list_paginated("A1", &query).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(
        page.items[0].trade_date.as_deref(),
        Some("2025-01-03T00:00:00Z")
    );
    assert_eq!(
        page.items[1].trade_date.as_deref(),
        Some("2025-01-02T00:00:00Z")
    );

    // Activities are scoped to their account.
    let other = db
        .activities()
        .list_paginated("other", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(other.total, 0);
}

// =============================================================================
// Positions
// =============================================================================

#[tokio::test]
async fn positions_are_replaced_wholesale() {
    let db = test_db().await;
    db.accounts().upsert(&sample_account("A1")).await.unwrap();

    let first = vec![
        Position {
            symbol: "CRDB".to_string(),
            quantity: 100.0,
            ..Default::default()
        },
        Position {
            symbol: "NMB".to_string(),
            quantity: 50.0,
            ..Default::default()
        },
    ];
    let count = db
        .positions()
        .replace_for_account("A1", &first)
        .await
        .unwrap();
    assert_eq!(count, 2);

    // A later sync reports a single position; the old set is gone.
    let second = vec![Position {
        symbol: "TBL".to_string(),
        quantity: 10.0,
        ..Default::default()
    }];
    db.positions()
        .replace_for_account("A1", &second)
        .await
        .unwrap();

    let stored = db.positions().list_by_account("A1").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].symbol, "TBL");
    assert_eq!(stored[0].account_id, "A1");
}

#[tokio::test]
async fn replacing_with_empty_set_clears_positions() {
    let db = test_db().await;
    db.accounts().upsert(&sample_account("A1")).await.unwrap();

    db.positions()
        .replace_for_account(
            "A1",
            &[Position {
                symbol: "CRDB".to_string(),
                quantity: 1.0,
                ..Default::default()
            }],
        )
        .await
        .unwrap();
    db.positions().replace_for_account("A1", &[]).await.unwrap();

    assert!(db.positions().list_by_account("A1").await.unwrap().is_empty());
}

// =============================================================================
// Sync runs
// =============================================================================

#[tokio::test]
async fn sync_run_lifecycle_roundtrip() {
    let db = test_db().await;

    let mut run = SyncRun::started("run-1".to_string(), current_timestamp());
    db.sync_runs().create(&run).await.unwrap();

    let stored = db.sync_runs().get("run-1").await.unwrap();
    assert_eq!(stored.status, SyncRunStatus::Running);
    assert!(stored.finished_at.is_none());

    run.status = SyncRunStatus::Completed;
    run.accounts = 2;
    run.activities = 14;
    run.positions = 5;
    run.finished_at = Some(current_timestamp());
    db.sync_runs().update(&run).await.unwrap();

    let stored = db.sync_runs().get("run-1").await.unwrap();
    assert_eq!(stored.status, SyncRunStatus::Completed);
    assert_eq!(stored.activities, 14);
    assert!(stored.finished_at.is_some());
}

#[tokio::test]
async fn latest_returns_most_recent_run() {
    let db = test_db().await;

    assert!(db.sync_runs().latest().await.unwrap().is_none());

    db.sync_runs()
        .create(&SyncRun::started(
            "run-1".to_string(),
            "2025-01-01 10:00:00".to_string(),
        ))
        .await
        .unwrap();
    db.sync_runs()
        .create(&SyncRun::started(
            "run-2".to_string(),
            "2025-01-02 10:00:00".to_string(),
        ))
        .await
        .unwrap();

    let latest = db.sync_runs().latest().await.unwrap().unwrap();
    assert_eq!(latest.id, "run-2");
}

#[tokio::test]
async fn updating_unknown_run_is_not_found() {
    let db = test_db().await;

    let run = SyncRun::started("ghost".to_string(), current_timestamp());
    let err = db.sync_runs().update(&run).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}
