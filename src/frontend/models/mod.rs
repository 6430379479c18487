use serde::{Deserialize, Serialize};

/// Account response from API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_number: Option<String>,
    pub currency: String,
    pub status: Option<String>,
    pub institution: String,
    pub updated_at: String,
}

/// Position response from API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub name: Option<String>,
    pub quantity: f64,
    pub price: Option<f64>,
    pub average_cost: Option<f64>,
    pub currency: Option<String>,
    pub updated_at: String,
}

/// Activity response from API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub account_id: String,
    pub external_ref: Option<String>,
    pub activity_type: String,
    pub symbol: Option<String>,
    pub symbol_name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub fee: Option<f64>,
    pub currency: Option<String>,
    pub trade_date: Option<String>,
    pub settlement_date: Option<String>,
    pub description: Option<String>,
}

/// Response from starting a sync run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncStarted {
    pub run_id: String,
    pub status: String,
}

/// Status of the most recent sync run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncStatus {
    pub run_id: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub accounts: usize,
    pub activities: usize,
    pub positions: usize,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Sync lifecycle events broadcast by the backend over the WebSocket.
///
/// Wire format mirrors the backend's ChangeNotifier messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum UpdateMessage {
    SyncStarted {
        run_id: String,
    },
    SyncCompleted {
        run_id: String,
        accounts: usize,
        activities: usize,
        positions: usize,
    },
    SyncFailed {
        run_id: String,
        message: String,
    },
}
