use crate::cli::api_client::ApiClient;
use crate::cli::commands::sync::*;

// =============================================================================
// Unit Tests - Focused on CLI function logic and error handling
// =============================================================================
//
// NOTE: These tests focus on:
// 1. Error handling when API is unavailable
// 2. Output formatting
//
// The actual sync orchestration is fully tested in:
// - src/sync/manager_test.rs (pull logic and run lifecycle)
// - src/api/v1/broker_test.rs (acceptance, events, status endpoint)
// =============================================================================

#[tokio::test]
async fn test_run_connection_error() {
    // Test error handling when API server is not available
    let api_client = ApiClient::new(Some("http://localhost:9999".to_string()));

    let result = run(&api_client).await;
    assert!(
        result.is_err(),
        "Should return error when API is unavailable"
    );
    let error = result.unwrap_err().to_string();
    assert!(
        error.contains("Could not reach"),
        "Error should mention connection failure, got: {}",
        error
    );
}

#[tokio::test]
async fn test_status_connection_error() {
    // Test error handling when API server is not available
    let api_client = ApiClient::new(Some("http://localhost:9999".to_string()));

    let result = status(&api_client).await;
    assert!(
        result.is_err(),
        "Should return error when API is unavailable"
    );
    let error = result.unwrap_err().to_string();
    assert!(
        error.contains("Could not reach"),
        "Error should mention connection failure, got: {}",
        error
    );
}

// =============================================================================
// Formatting
// =============================================================================

fn status_from_json(value: serde_json::Value) -> SyncStatusResponse {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_format_never_synced() {
    let status = status_from_json(serde_json::json!({
        "run_id": null,
        "status": "never_synced",
        "message": null,
        "accounts": 0,
        "activities": 0,
        "positions": 0,
        "started_at": null,
        "finished_at": null,
    }));

    let output = format_sync_status(&status);
    assert!(output.contains("No sync has run yet"));
    assert!(output.contains("folio sync run"));
}

#[test]
fn test_format_completed_run() {
    let status = status_from_json(serde_json::json!({
        "run_id": "a1b2c3d4",
        "status": "completed",
        "message": null,
        "accounts": 1,
        "activities": 12,
        "positions": 3,
        "started_at": "2025-01-01 08:00:00",
        "finished_at": "2025-01-01 08:00:05",
    }));

    let output = format_sync_status(&status);
    assert!(output.contains("✓ Last sync: completed"));
    assert!(output.contains("a1b2c3d4"));
    assert!(output.contains("12"));
}

#[test]
fn test_format_failed_run_includes_message() {
    let status = status_from_json(serde_json::json!({
        "run_id": "a1b2c3d4",
        "status": "failed",
        "message": "Broker API error (503): broker unavailable",
        "accounts": 0,
        "activities": 0,
        "positions": 0,
        "started_at": "2025-01-01 08:00:00",
        "finished_at": "2025-01-01 08:00:01",
    }));

    let output = format_sync_status(&status);
    assert!(output.contains("✗ Last sync: failed"));
    assert!(output.contains("broker unavailable"));
}
