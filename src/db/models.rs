//! Domain entities stored by folio.

use serde::{Deserialize, Serialize};

/// A brokerage account pulled from the DSE API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Broker-assigned id, used verbatim as the primary key.
    pub id: String,
    pub name: String,
    pub account_number: Option<String>,
    pub currency: String,
    pub status: Option<String>,
    pub institution: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A single account activity (trade, dividend, fee, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub account_id: String,
    /// Broker-side reference; the upsert key across syncs.
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
    pub created_at: String,
}

/// An open position in an account, replaced wholesale on every sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub id: String,
    pub account_id: String,
    pub symbol: String,
    pub name: Option<String>,
    pub quantity: f64,
    pub price: Option<f64>,
    pub average_cost: Option<f64>,
    pub currency: Option<String>,
    pub updated_at: String,
}

/// Lifecycle state of a sync run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncRunStatus {
    Running,
    Completed,
    Failed,
}

impl SyncRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyncRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One broker sync run, from acceptance to completion or failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncRun {
    pub id: String,
    pub status: SyncRunStatus,
    /// Failure message for failed runs.
    pub message: Option<String>,
    pub accounts: usize,
    pub activities: usize,
    pub positions: usize,
    pub started_at: String,
    pub finished_at: Option<String>,
}

impl SyncRun {
    /// A freshly accepted run with zero counts.
    pub fn started(id: String, started_at: String) -> Self {
        Self {
            id,
            status: SyncRunStatus::Running,
            message: None,
            accounts: 0,
            activities: 0,
            positions: 0,
            started_at,
            finished_at: None,
        }
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Pagination and sorting for list queries.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

/// A page of results plus the total row count.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: Option<usize>,
    pub offset: usize,
}
