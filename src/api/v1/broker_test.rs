//! Integration tests for broker sync endpoints.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::notifier::{ChangeNotifier, UpdateMessage};
use crate::api::{AppState, routes};
use crate::broker::{BrokerActivity, BrokerHoldings, BrokerPosition, MockBroker};
use crate::db::{Database, SqliteDatabase, SyncRunRepository, SyncRunStatus};
use crate::sync::SyncManager;

type TestState = AppState<SqliteDatabase, MockBroker>;

/// Create a test state with an in-memory database and the given broker.
/// The state is returned alongside the router so tests can inspect the
/// database and subscribe to the notifier.
async fn test_state(broker: MockBroker) -> (TestState, axum::Router) {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let state = AppState::new(db, SyncManager::new(broker), ChangeNotifier::new());
    let app = routes::create_router(state.clone(), false);
    (state, app)
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn sync_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/sync")
        .body(Body::empty())
        .unwrap()
}

/// Wait for the next lifecycle event, panicking if none arrives.
async fn next_event(rx: &mut tokio::sync::broadcast::Receiver<UpdateMessage>) -> UpdateMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for sync event")
        .expect("notifier channel closed")
}

// =============================================================================
// POST /api/v1/sync - Trigger Sync
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn trigger_sync_returns_accepted_with_run_id() {
    let (state, app) = test_state(MockBroker::empty()).await;

    let response = app.oneshot(sync_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = json_body(response).await;
    let run_id = body["run_id"].as_str().expect("Expected run_id");
    assert_eq!(run_id.len(), 8);
    assert_eq!(body["status"], "running");

    // The run row was persisted before the response was sent.
    let run = state.db().sync_runs().get(run_id).await.unwrap();
    assert_eq!(run.id, run_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn trigger_sync_emits_started_and_completed_events() {
    let mut broker = MockBroker::with_account("acc-001", "CDS Account");
    broker.activities.push(BrokerActivity {
        external_ref: Some("ref-1".to_string()),
        activity_type: Some("buy".to_string()),
        symbol: Some("CRDB".to_string()),
        quantity: Some(100.0),
        ..Default::default()
    });
    broker.holdings = BrokerHoldings {
        balances: vec![],
        positions: vec![BrokerPosition {
            symbol: Some("CRDB".to_string()),
            quantity: Some(100.0),
            ..Default::default()
        }],
    };

    let (state, app) = test_state(broker).await;
    let mut rx = state.notifier().subscribe();

    let response = app.oneshot(sync_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let run_id = json_body(response).await["run_id"]
        .as_str()
        .unwrap()
        .to_string();

    match next_event(&mut rx).await {
        UpdateMessage::SyncStarted { run_id: started } => assert_eq!(started, run_id),
        other => panic!("Expected SyncStarted, got {:?}", other),
    }

    match next_event(&mut rx).await {
        UpdateMessage::SyncCompleted {
            run_id: completed,
            accounts,
            activities,
            positions,
        } => {
            assert_eq!(completed, run_id);
            assert_eq!(accounts, 1);
            assert_eq!(activities, 1);
            assert_eq!(positions, 1);
        }
        other => panic!("Expected SyncCompleted, got {:?}", other),
    }

    // The run row reflects the completed counts.
    let run = state.db().sync_runs().get(&run_id).await.unwrap();
    assert_eq!(run.status, SyncRunStatus::Completed);
    assert_eq!(run.accounts, 1);
    assert!(run.finished_at.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn trigger_sync_emits_failed_event_when_broker_is_down() {
    let mut broker = MockBroker::empty();
    broker.fail_accounts = true;

    let (state, app) = test_state(broker).await;
    let mut rx = state.notifier().subscribe();

    // Acceptance does not depend on the broker being reachable.
    let response = app.oneshot(sync_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let run_id = json_body(response).await["run_id"]
        .as_str()
        .unwrap()
        .to_string();

    match next_event(&mut rx).await {
        UpdateMessage::SyncStarted { .. } => {}
        other => panic!("Expected SyncStarted, got {:?}", other),
    }

    match next_event(&mut rx).await {
        UpdateMessage::SyncFailed {
            run_id: failed,
            message,
        } => {
            assert_eq!(failed, run_id);
            assert!(message.contains("broker unavailable"));
        }
        other => panic!("Expected SyncFailed, got {:?}", other),
    }

    let run = state.db().sync_runs().get(&run_id).await.unwrap();
    assert_eq!(run.status, SyncRunStatus::Failed);
}

#[tokio::test(flavor = "multi_thread")]
async fn trigger_sync_fails_when_run_cannot_be_persisted() {
    // Unmigrated database: the sync_run table does not exist, so
    // acceptance itself fails and no task is spawned.
    let db = SqliteDatabase::in_memory().await.unwrap();
    let state = AppState::new(
        db,
        SyncManager::new(MockBroker::empty()),
        ChangeNotifier::new(),
    );
    let mut rx = state.notifier().subscribe();
    let app = routes::create_router(state, false);

    let response = app.oneshot(sync_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some());

    // No lifecycle events were emitted.
    assert!(rx.try_recv().is_err());
}

// =============================================================================
// GET /api/v1/sync/status - Sync Status
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn sync_status_reports_never_synced_initially() {
    let (_state, app) = test_state(MockBroker::empty()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/sync/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "never_synced");
    assert!(body["run_id"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_status_reports_latest_run() {
    let (state, app) = test_state(MockBroker::with_account("acc-001", "CDS Account")).await;
    let mut rx = state.notifier().subscribe();

    let response = app
        .clone()
        .oneshot(sync_request())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // Drain Started + Completed so the run row is final.
    next_event(&mut rx).await;
    next_event(&mut rx).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/sync/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["accounts"].as_u64().unwrap(), 1);
    assert!(body["run_id"].as_str().is_some());
    assert!(body["finished_at"].as_str().is_some());
}
