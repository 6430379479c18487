//! Account command implementations.

use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_number: Option<String>,
    pub currency: String,
    pub status: Option<String>,
    pub institution: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Position {
    pub symbol: String,
    pub name: Option<String>,
    pub quantity: f64,
    pub price: Option<f64>,
    pub average_cost: Option<f64>,
    pub currency: Option<String>,
    pub updated_at: String,
}

#[derive(Tabled)]
struct AccountDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Account> for AccountDisplay {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            number: account.account_number.clone().unwrap_or("-".to_string()),
            currency: account.currency.clone(),
            status: account.status.clone().unwrap_or("-".to_string()),
        }
    }
}

#[derive(Tabled)]
struct PositionDisplay {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Avg Cost")]
    average_cost: String,
}

impl From<&Position> for PositionDisplay {
    fn from(position: &Position) -> Self {
        Self {
            symbol: position.symbol.clone(),
            name: position.name.clone().unwrap_or("-".to_string()),
            quantity: format!("{}", position.quantity),
            price: position
                .price
                .map(|p| format!("{:.2}", p))
                .unwrap_or("-".to_string()),
            average_cost: position
                .average_cost
                .map(|c| format!("{:.2}", c))
                .unwrap_or("-".to_string()),
        }
    }
}

/// List synced accounts
pub async fn list_accounts(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let response = api_client
        .get("/api/v1/accounts")
        .send()
        .await
        .map_err(|e| CliError::ConnectionFailed { source: e })?;

    let accounts: Vec<Account> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&accounts)?),
        _ => Ok(format_accounts_table(&accounts)),
    }
}

/// List an account's open positions
pub async fn list_positions(
    api_client: &ApiClient,
    account_id: &str,
    format: &str,
) -> CliResult<String> {
    let response = api_client
        .get(&format!("/api/v1/accounts/{}/positions", account_id))
        .send()
        .await
        .map_err(|e| CliError::ConnectionFailed { source: e })?;

    let positions: Vec<Position> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&positions)?),
        _ => Ok(format_positions_table(&positions)),
    }
}

pub(super) fn format_accounts_table(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found. Run: folio sync run".to_string();
    }

    let display: Vec<AccountDisplay> = accounts.iter().map(|a| a.into()).collect();
    let mut table = Table::new(display);
    table.with(Style::rounded());
    table.to_string()
}

pub(super) fn format_positions_table(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No open positions.".to_string();
    }

    let display: Vec<PositionDisplay> = positions.iter().map(|p| p.into()).collect();
    let mut table = Table::new(display);
    table.with(Style::rounded());
    table.to_string()
}
