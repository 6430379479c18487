use crate::cli::api_client::ApiClient;
use crate::cli::commands::account::*;

#[tokio::test]
async fn test_list_accounts_connection_error() {
    let api_client = ApiClient::new(Some("http://localhost:9999".to_string()));

    let result = list_accounts(&api_client, "table").await;
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
async fn test_list_positions_connection_error() {
    let api_client = ApiClient::new(Some("http://localhost:9999".to_string()));

    let result = list_positions(&api_client, "acc-001", "table").await;
    assert!(
        result.is_err(),
        "Should return error when API is unavailable"
    );
}

// =============================================================================
// Formatting
// =============================================================================

fn sample_account() -> Account {
    Account {
        id: "acc-001".to_string(),
        name: "CDS Account".to_string(),
        account_number: Some("CDS-001".to_string()),
        currency: "TZS".to_string(),
        status: Some("active".to_string()),
        institution: "DSE".to_string(),
        updated_at: "2025-01-01 08:00:00".to_string(),
    }
}

#[test]
fn test_format_accounts_table_empty() {
    let output = format_accounts_table(&[]);
    assert!(output.contains("No accounts found"));
    assert!(output.contains("folio sync run"));
}

#[test]
fn test_format_accounts_table_rows() {
    let output = format_accounts_table(&[sample_account()]);
    assert!(output.contains("acc-001"));
    assert!(output.contains("CDS Account"));
    assert!(output.contains("TZS"));
}

#[test]
fn test_format_positions_table_empty() {
    let output = format_positions_table(&[]);
    assert_eq!(output, "No open positions.");
}

#[test]
fn test_format_positions_table_renders_missing_price_as_dash() {
    let position = Position {
        symbol: "CRDB".to_string(),
        name: Some("CRDB Bank Plc".to_string()),
        quantity: 100.0,
        price: None,
        average_cost: Some(410.5),
        currency: Some("TZS".to_string()),
        updated_at: "2025-01-01 08:00:00".to_string(),
    };

    let output = format_positions_table(&[position]);
    assert!(output.contains("CRDB"));
    assert!(output.contains("410.50"));
    assert!(output.contains("-"));
}
