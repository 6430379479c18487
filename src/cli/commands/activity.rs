//! Activity command implementations.

use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use super::PageParams;
use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};

#[derive(Debug, Serialize, Deserialize)]
struct ListActivitiesResponse {
    items: Vec<Activity>,
    total: usize,
    limit: usize,
    offset: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Activity {
    pub id: String,
    pub account_id: String,
    pub activity_type: String,
    pub symbol: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub trade_date: Option<String>,
}

#[derive(Tabled)]
struct ActivityDisplay {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    activity_type: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Activity> for ActivityDisplay {
    fn from(activity: &Activity) -> Self {
        Self {
            // Trade dates are RFC 3339 pinned to midnight; show the day.
            date: activity
                .trade_date
                .as_deref()
                .map(|d| d.chars().take(10).collect())
                .unwrap_or("-".to_string()),
            activity_type: activity.activity_type.clone(),
            symbol: activity.symbol.clone().unwrap_or("-".to_string()),
            quantity: activity
                .quantity
                .map(|q| format!("{}", q))
                .unwrap_or("-".to_string()),
            price: activity
                .price
                .map(|p| format!("{:.2}", p))
                .unwrap_or("-".to_string()),
            amount: activity
                .amount
                .map(|a| format!("{:.2}", a))
                .unwrap_or("-".to_string()),
        }
    }
}

/// List an account's activities with pagination and sorting
pub async fn list_activities(
    api_client: &ApiClient,
    account_id: &str,
    page: PageParams<'_>,
    format: &str,
) -> CliResult<String> {
    let mut path = format!("/api/v1/accounts/{}/activities", account_id);
    let mut query_params = Vec::new();

    if let Some(l) = page.limit {
        query_params.push(format!("limit={}", l));
    }
    if let Some(o) = page.offset {
        query_params.push(format!("offset={}", o));
    }
    if let Some(s) = page.sort {
        query_params.push(format!("sort={}", s));
    }
    if let Some(o) = page.order {
        query_params.push(format!("order={}", o));
    }

    if !query_params.is_empty() {
        path = format!("{}?{}", path, query_params.join("&"));
    }

    let response = api_client
        .get(&path)
        .send()
        .await
        .map_err(|e| CliError::ConnectionFailed { source: e })?;

    let list: ListActivitiesResponse = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&list.items)?),
        _ => Ok(format_activities_table(&list.items, list.total)),
    }
}

pub(super) fn format_activities_table(activities: &[Activity], total: usize) -> String {
    if activities.is_empty() {
        return "No activities found.".to_string();
    }

    let display: Vec<ActivityDisplay> = activities.iter().map(|a| a.into()).collect();
    let mut table = Table::new(display);
    table.with(Style::rounded());

    format!("{}\nShowing {} of {}", table, activities.len(), total)
}
