//! Broker API abstraction.
//!
//! The sync orchestrator pulls accounts, activities, and holdings through
//! the [`BrokerClient`] trait so the HTTP client can be swapped for a mock
//! in tests. The only production implementation talks to the local DSE
//! (Dar es Salaam Stock Exchange) API service.

mod dse;


use std::future::Future;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dse::DseClient;

/// Errors from broker API calls.
#[derive(Error, Diagnostic, Debug)]
pub enum BrokerError {
    #[error("Broker request failed: {message}")]
    #[diagnostic(code(folio::broker::request))]
    Request { message: String },

    #[error("Broker request timed out")]
    #[diagnostic(
        code(folio::broker::timeout),
        help("Is the DSE API service running? Check DSE_API_URL.")
    )]
    Timeout,

    #[error("Broker API error ({status}): {message}")]
    #[diagnostic(code(folio::broker::api))]
    Api { status: u16, message: String },

    #[error("Broker response parse error: {message}")]
    #[diagnostic(code(folio::broker::parse))]
    Parse { message: String },
}

/// Result type for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;

/// An account as reported by the broker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrokerAccount {
    pub id: String,
    pub name: Option<String>,
    pub account_number: Option<String>,
    pub currency: Option<String>,
    pub status: Option<String>,
}

/// A single activity (trade, dividend, fee, ...) from the broker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerActivity {
    /// Broker-side id; stable across syncs when present.
    pub external_ref: Option<String>,
    pub activity_type: Option<String>,
    pub symbol: Option<String>,
    pub symbol_name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub fee: Option<f64>,
    pub currency: Option<String>,
    /// RFC 3339, normalized to midnight UTC.
    pub trade_date: Option<String>,
    pub settlement_date: Option<String>,
    pub description: Option<String>,
}

/// Wire pagination detail from activity listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerPagination {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub total: Option<i64>,
    pub has_more: Option<bool>,
}

/// One page of activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerActivityPage {
    pub activities: Vec<BrokerActivity>,
    pub pagination: Option<BrokerPagination>,
}

/// Query parameters for an activity page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityQuery {
    /// Inclusive start date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Cash balance in one currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerBalance {
    pub currency: Option<String>,
    pub cash: Option<f64>,
}

/// An open position as reported by the broker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerPosition {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub average_cost: Option<f64>,
    pub currency: Option<String>,
}

/// Balances and positions for one account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrokerHoldings {
    pub balances: Vec<BrokerBalance>,
    pub positions: Vec<BrokerPosition>,
}

/// Read-only broker API surface consumed by the sync orchestrator.
pub trait BrokerClient: Send + Sync {
    /// List all accounts visible to the configured API key.
    fn list_accounts(&self) -> impl Future<Output = BrokerResult<Vec<BrokerAccount>>> + Send;

    /// Fetch one page of activities for an account.
    fn account_activities(
        &self,
        account_id: &str,
        query: &ActivityQuery,
    ) -> impl Future<Output = BrokerResult<BrokerActivityPage>> + Send;

    /// Fetch current balances and positions for an account.
    fn account_holdings(
        &self,
        account_id: &str,
    ) -> impl Future<Output = BrokerResult<BrokerHoldings>> + Send;
}

/// Scripted broker for tests: fixed data, optional failure injection.
#[cfg(test)]
pub struct MockBroker {
    pub accounts: Vec<BrokerAccount>,
    pub activities: Vec<BrokerActivity>,
    pub holdings: BrokerHoldings,
    pub fail_accounts: bool,
    pub fail_activities: bool,
}

#[cfg(test)]
impl MockBroker {
    pub fn empty() -> Self {
        Self {
            accounts: vec![],
            activities: vec![],
            holdings: BrokerHoldings::default(),
            fail_accounts: false,
            fail_activities: false,
        }
    }

    pub fn with_account(id: &str, name: &str) -> Self {
        let mut broker = Self::empty();
        broker.accounts.push(BrokerAccount {
            id: id.to_string(),
            name: Some(name.to_string()),
            account_number: Some("CDS-001".to_string()),
            currency: Some("TZS".to_string()),
            status: Some("active".to_string()),
        });
        broker
    }
}

#[cfg(test)]
impl BrokerClient for MockBroker {
    async fn list_accounts(&self) -> BrokerResult<Vec<BrokerAccount>> {
        if self.fail_accounts {
            return Err(BrokerError::Api {
                status: 503,
                message: "broker unavailable".to_string(),
            });
        }
        Ok(self.accounts.clone())
    }

    async fn account_activities(
        &self,
        _account_id: &str,
        query: &ActivityQuery,
    ) -> BrokerResult<BrokerActivityPage> {
        if self.fail_activities {
            return Err(BrokerError::Api {
                status: 500,
                message: "activities unavailable".to_string(),
            });
        }

        // Single page regardless of offset beyond the first.
        if query.offset.unwrap_or(0) > 0 {
            return Ok(BrokerActivityPage {
                activities: vec![],
                pagination: Some(BrokerPagination {
                    has_more: Some(false),
                    ..Default::default()
                }),
            });
        }

        Ok(BrokerActivityPage {
            activities: self.activities.clone(),
            pagination: Some(BrokerPagination {
                offset: Some(0),
                limit: query.limit,
                total: Some(self.activities.len() as i64),
                has_more: Some(false),
            }),
        })
    }

    async fn account_holdings(&self, _account_id: &str) -> BrokerResult<BrokerHoldings> {
        Ok(self.holdings.clone())
    }
}
