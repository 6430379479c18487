use crate::cli::api_client::ApiClient;
use crate::cli::commands::PageParams;
use crate::cli::commands::activity::*;

#[tokio::test]
async fn test_list_activities_connection_error() {
    let api_client = ApiClient::new(Some("http://localhost:9999".to_string()));

    let result = list_activities(&api_client, "acc-001", PageParams::default(), "table").await;
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

fn sample_activity() -> Activity {
    Activity {
        id: "act-001".to_string(),
        account_id: "acc-001".to_string(),
        activity_type: "buy".to_string(),
        symbol: Some("CRDB".to_string()),
        quantity: Some(100.0),
        price: Some(410.0),
        amount: Some(41000.0),
        currency: Some("TZS".to_string()),
        trade_date: Some("2025-01-15T00:00:00Z".to_string()),
    }
}

#[test]
fn test_format_activities_table_empty() {
    let output = format_activities_table(&[], 0);
    assert_eq!(output, "No activities found.");
}

#[test]
fn test_format_activities_table_shows_date_only() {
    let output = format_activities_table(&[sample_activity()], 1);
    // RFC 3339 timestamps are trimmed to the day for display.
    assert!(output.contains("2025-01-15"));
    assert!(!output.contains("T00:00:00Z"));
    assert!(output.contains("buy"));
    assert!(output.contains("Showing 1 of 1"));
}

#[test]
fn test_format_activities_table_reports_page_of_total() {
    let output = format_activities_table(&[sample_activity()], 25);
    assert!(output.contains("Showing 1 of 25"));
}
