//! Sync command implementations.

use serde::Deserialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};

/// Response from starting a sync run
#[derive(Debug, Deserialize)]
struct SyncStartedResponse {
    run_id: String,
}

/// Status of the most recent sync run
#[derive(Debug, Deserialize)]
pub struct SyncStatusResponse {
    run_id: Option<String>,
    status: String,
    message: Option<String>,
    accounts: u64,
    activities: u64,
    positions: u64,
    started_at: Option<String>,
    finished_at: Option<String>,
}

/// Start a broker sync run
pub async fn run(api_client: &ApiClient) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/sync")
        .send()
        .await
        .map_err(|e| CliError::ConnectionFailed { source: e })?;

    let started: SyncStartedResponse = ApiClient::handle_response(response).await?;

    Ok(format!(
        "✓ Sync started (run {})\n\nThe pull runs in the background. Follow progress with: folio sync status",
        started.run_id
    ))
}

/// Get sync status
pub async fn status(api_client: &ApiClient) -> CliResult<String> {
    let response = api_client
        .get("/api/v1/sync/status")
        .send()
        .await
        .map_err(|e| CliError::ConnectionFailed { source: e })?;

    let status: SyncStatusResponse = ApiClient::handle_response(response).await?;

    Ok(format_sync_status(&status))
}

#[derive(Tabled)]
struct SyncStatusRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub(super) fn format_sync_status(status: &SyncStatusResponse) -> String {
    if status.status == "never_synced" {
        return "No sync has run yet. Start one with: folio sync run\n".to_string();
    }

    let icon = match status.status.as_str() {
        "completed" => "✓",
        "failed" => "✗",
        _ => "…",
    };

    let mut output = format!("{} Last sync: {}\n", icon, status.status);
    if let Some(message) = &status.message {
        output.push_str(&format!("  {}\n", message));
    }
    output.push('\n');

    let rows = vec![
        SyncStatusRow {
            item: "Run".to_string(),
            value: status.run_id.clone().unwrap_or("-".to_string()),
        },
        SyncStatusRow {
            item: "Accounts".to_string(),
            value: status.accounts.to_string(),
        },
        SyncStatusRow {
            item: "Activities".to_string(),
            value: status.activities.to_string(),
        },
        SyncStatusRow {
            item: "Positions".to_string(),
            value: status.positions.to_string(),
        },
        SyncStatusRow {
            item: "Started".to_string(),
            value: status.started_at.clone().unwrap_or("-".to_string()),
        },
        SyncStatusRow {
            item: "Finished".to_string(),
            value: status.finished_at.clone().unwrap_or("-".to_string()),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output.push_str(&table.to_string());

    output
}
